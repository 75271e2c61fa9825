//! Tests for the session-scoped gateway operations.

mod common;

use std::{sync::Arc, time::Duration};

use chrono::{TimeZone, Utc};
use mt5_rest_gateway::common::{OrderSide, Timeframe};
use mt5_rest_gateway::gateway::{CloseTarget, MarketOrder};
use mt5_rest_gateway::terminal::{Record, Selector};
use mt5_rest_gateway::{ErrorKind, GatewayError, Mt5Gateway};
use rstest::rstest;
use serde_json::json;
use tracing_test::traced_test;

use common::{credential, credential_with_password, eurusd, position, record, MockTerminal};

fn gateway(mock: &Arc<MockTerminal>) -> Mt5Gateway {
    Mt5Gateway::new(mock.clone())
}

fn order(side: OrderSide) -> MarketOrder {
    MarketOrder {
        symbol: "EURUSD".to_string(),
        lot: 0.1,
        sl: Some(1.05),
        tp: None,
        deviation: 20,
        magic: Some(7),
        comment: Some("api".to_string()),
        side,
    }
}

#[tokio::test]
async fn test_account_info_runs_one_session() {
    let mock = MockTerminal::default().into_arc();

    let account = gateway(&mock).account_info(&credential()).await.unwrap();

    assert_eq!(account, mock.account.clone().unwrap());
    assert_eq!(mock.calls(), ["initialize", "login", "account_info", "shutdown"]);
}

#[tokio::test]
async fn test_login_rejected_still_shuts_down() {
    let mock = MockTerminal::default().into_arc();

    let err = gateway(&mock)
        .account_info(&credential_with_password("wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(
        err.to_string(),
        "failed to connect to trade account, error code = (-6, 'Terminal: Authorization failed')"
    );
    assert_eq!(mock.calls(), ["initialize", "login", "last_error", "shutdown"]);
}

#[tokio::test]
async fn test_filtered_queries_shut_down_on_login_failure() {
    let mock = MockTerminal::default().into_arc();
    let gateway = gateway(&mock);
    let bad = credential_with_password("wrong");

    assert!(gateway.orders(&bad, &Selector::Symbol("EURUSD".into())).await.is_err());
    assert!(gateway.positions(&bad, &Selector::All).await.is_err());

    assert_eq!(mock.count("shutdown"), 2);
    assert_eq!(mock.count("orders_get"), 0);
    assert_eq!(mock.count("positions_get"), 0);
}

#[tokio::test]
async fn test_initialize_failure_is_connectivity() {
    let mock = MockTerminal {
        initialize_ok: false,
        last_error: mt5_rest_gateway::terminal::LastError::new(-10005, "IPC timeout"),
        ..MockTerminal::default()
    }
    .into_arc();

    let err = gateway(&mock).orders_total(&credential()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert_eq!(err.to_string(), "initialize() failed, error code = (-10005, 'IPC timeout')");
    assert_eq!(mock.calls(), ["initialize", "last_error"]);
}

#[tokio::test]
async fn test_missing_account_is_not_found() {
    let mock = MockTerminal {
        account: None,
        ..MockTerminal::default()
    }
    .into_arc();

    let err = gateway(&mock).account_info(&credential()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(mock.count("shutdown"), 1);
}

#[tokio::test]
async fn test_symbol_info_not_found() {
    let mock = MockTerminal::default().into_arc();

    let err = gateway(&mock)
        .symbol_info(&credential(), "XAUUSD")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::NotFound(ref msg) if msg.contains("XAUUSD")));
}

#[rstest]
#[case::null(None)]
#[case::empty(Some(Vec::new()))]
#[tokio::test]
async fn test_empty_rates_become_empty_list(#[case] rates: Option<Vec<Record>>) {
    let mock = MockTerminal {
        rates,
        ..MockTerminal::default()
    }
    .into_arc();
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let bars = gateway(&mock)
        .copy_rates_from(&credential(), "EURUSD", Timeframe::M5, from, 10)
        .await
        .unwrap();

    assert!(bars.is_empty());
}

#[tokio::test]
async fn test_rates_are_tabulated_by_first_bar() {
    let mock = MockTerminal {
        rates: Some(vec![
            record(json!({"time": 1, "open": 1.1, "high": 1.2, "low": 1.0, "close": 1.15})),
            record(json!({
                "close": 1.16, "time": 2, "open": 1.15, "high": 1.17, "low": 1.14, "spread": 3,
            })),
        ]),
        ..MockTerminal::default()
    }
    .into_arc();

    let bars = gateway(&mock)
        .copy_rates_from_pos(&credential(), "EURUSD", Timeframe::H1, 0, 2)
        .await
        .unwrap();

    let columns: Vec<&str> = bars[1].keys().map(String::as_str).collect();
    assert_eq!(columns, ["time", "open", "high", "low", "close"]);
    assert_eq!(bars[1]["close"], json!(1.16));
}

#[tokio::test]
async fn test_positions_without_filter_returns_all() {
    let mock = MockTerminal {
        positions: Some(vec![
            position(1, "EURUSD", 0, 0.1),
            position(2, "GBPUSD", 1, 0.2),
        ]),
        ..MockTerminal::default()
    }
    .into_arc();
    let gateway = gateway(&mock);

    let all = gateway.positions(&credential(), &Selector::All).await.unwrap();
    let one = gateway
        .positions(&credential(), &Selector::Ticket(2))
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0]["symbol"], "GBPUSD");
}

#[rstest]
#[case::buy(OrderSide::Buy, 0, 1.1002)]
#[case::sell(OrderSide::Sell, 1, 1.1000)]
#[tokio::test]
async fn test_order_send_prices_from_quote(
    #[case] side: OrderSide,
    #[case] order_type: i64,
    #[case] price: f64,
) {
    let mock = MockTerminal::default().into_arc();

    let result = gateway(&mock)
        .order_send(&credential(), &order(side))
        .await
        .unwrap();

    assert_eq!(result["retcode"], 10009);
    let sent = mock.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_type, order_type);
    assert_eq!(sent[0].price, price);
    assert_eq!(sent[0].action, 1);
    assert_eq!(sent[0].sl, Some(1.05));
    assert_eq!(sent[0].magic, Some(7));
    assert_eq!(sent[0].position, None);
}

#[tokio::test]
async fn test_order_send_rejected_retcode() {
    let mock = MockTerminal {
        send_retcode: Some(10019),
        ..MockTerminal::default()
    }
    .into_arc();

    let err = gateway(&mock)
        .order_send(&credential(), &order(OrderSide::Buy))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert!(err.to_string().contains("10019"));
    assert_eq!(mock.count("shutdown"), 1);
}

#[tokio::test]
async fn test_order_send_without_result() {
    let mock = MockTerminal {
        send_retcode: None,
        ..MockTerminal::default()
    }
    .into_arc();

    let err = gateway(&mock)
        .order_send(&credential(), &order(OrderSide::Sell))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::OrderNotSent(_)));
    assert_eq!(err.kind(), ErrorKind::Rejected);
}

#[tokio::test]
async fn test_order_send_unknown_symbol() {
    let mock = MockTerminal::default().into_arc();
    let mut unknown = order(OrderSide::Buy);
    unknown.symbol = "NOPE".to_string();

    let err = gateway(&mock)
        .order_send(&credential(), &unknown)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to select NOPE");
    assert!(mock.sent().is_empty());
}

#[rstest]
#[case::buy_position_sells_at_bid(0, 1, 1.1000)]
#[case::sell_position_buys_at_ask(1, 0, 1.1002)]
#[tokio::test]
async fn test_order_close_offsets_position(
    #[case] opened: i64,
    #[case] closing: i64,
    #[case] price: f64,
) {
    let mock = MockTerminal {
        positions: Some(vec![position(555, "EURUSD", opened, 0.3)]),
        ..MockTerminal::default()
    }
    .into_arc();

    let results = gateway(&mock)
        .order_close(&credential(), &CloseTarget::Ticket(555))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let sent = mock.sent();
    assert_eq!(sent[0].order_type, closing);
    assert_eq!(sent[0].price, price);
    assert_eq!(sent[0].volume, 0.3);
    assert_eq!(sent[0].position, Some(555));
    assert_eq!(sent[0].deviation, 20);
    assert_eq!(sent[0].magic, Some(42));
    assert_eq!(sent[0].comment.as_deref(), Some("grid"));
}

#[tokio::test]
async fn test_order_close_skips_unresolved_symbols() {
    let mock = MockTerminal {
        positions: Some(vec![
            position(1, "EURUSD", 0, 0.1),
            position(2, "DELISTED", 0, 0.1),
            position(3, "EURUSD", 1, 0.2),
        ]),
        send_retcode: Some(10004),
        ..MockTerminal::default()
    }
    .into_arc();

    let results = gateway(&mock)
        .order_close(&credential(), &CloseTarget::Symbol("EURUSD".into()))
        .await
        .unwrap();

    // Only EURUSD positions match, and non-done results are still returned.
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["retcode"] == 10004));

    let results = gateway(&mock)
        .order_close(&credential(), &CloseTarget::Ticket(2))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_order_close_skips_undecodable_positions() {
    let mut malformed = position(2, "EURUSD", 0, 0.4);
    malformed.remove("volume");
    let mock = MockTerminal {
        positions: Some(vec![
            position(1, "EURUSD", 0, 0.1),
            malformed,
            position(3, "EURUSD", 7, 0.2),
            position(4, "EURUSD", 1, 0.3),
        ]),
        ..MockTerminal::default()
    }
    .into_arc();

    let results = gateway(&mock)
        .order_close(&credential(), &CloseTarget::Symbol("EURUSD".into()))
        .await
        .unwrap();

    // Tickets 2 (no volume) and 3 (unknown type) are skipped; deals already
    // sent for 1 and 4 are all reported.
    assert_eq!(results.len(), 2);
    let tickets: Vec<_> = mock.sent().iter().map(|r| r.position).collect();
    assert_eq!(tickets, [Some(1), Some(4)]);
    assert_eq!(mock.count("shutdown"), 1);
}

#[tokio::test]
async fn test_order_close_without_positions() {
    let mock = MockTerminal::default().into_arc();

    let err = gateway(&mock)
        .order_close(&credential(), &CloseTarget::Symbol("EURUSD".into()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No positions found for the given symbol or ticket");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(mock.count("shutdown"), 1);
}

#[tokio::test]
async fn test_sessions_never_overlap() {
    let mock = MockTerminal {
        call_delay: Some(Duration::from_millis(10)),
        ..MockTerminal::default()
    }
    .into_arc();
    let gateway = Arc::new(gateway(&mock));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move { gateway.account_info(&credential()).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(mock.max_active_sessions(), 1);
    assert_eq!(mock.count("shutdown"), 8);
}

#[tokio::test]
async fn test_dropped_session_is_shut_down() {
    let mock = MockTerminal {
        call_delay: Some(Duration::from_millis(200)),
        ..MockTerminal::default()
    }
    .into_arc();
    let gateway = gateway(&mock);

    let outcome =
        tokio::time::timeout(Duration::from_millis(20), gateway.account_info(&credential())).await;
    assert!(outcome.is_err());

    // The next session waits for the abandoned one to be shut down.
    gateway.account_info(&credential_with_password("wrong")).await.unwrap_err();

    assert_eq!(
        mock.calls()[..4],
        ["initialize", "login", "account_info", "shutdown"]
    );
    assert_eq!(mock.count("shutdown"), 2);
    assert_eq!(mock.max_active_sessions(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_session_lifecycle_is_logged() {
    let mock = MockTerminal::default().into_arc();

    gateway(&mock)
        .account_info(&credential_with_password("wrong"))
        .await
        .unwrap_err();

    assert!(logs_contain("trade account login rejected"));
    assert!(logs_contain("terminal session shut down"));
}

#[tokio::test]
async fn test_symbols_passthrough() {
    let mock = MockTerminal {
        symbols: Some(vec![eurusd()]),
        ..MockTerminal::default()
    }
    .into_arc();

    let symbols = gateway(&mock).symbols(&credential()).await.unwrap();

    assert_eq!(symbols, vec![eurusd()]);
}
