#![cfg(test)]
use chrono::{TimeZone, Utc};
use market_data_ingestor::{
    models::request_params::BarsRequestParams,
    providers::{DataProvider, ProviderError, yahoo::YahooProvider},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serves `status` and `body` to every connection until the test ends.
async fn serve(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}

fn params(symbol: &str) -> BarsRequestParams {
    let mut params =
        BarsRequestParams::daily_since(symbol, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    params.end = Some(Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap());
    params
}

const AAPL_CHART: &str = r#"{"chart":{"result":[{
    "meta":{"symbol":"AAPL","longName":"Apple Inc.","instrumentType":"EQUITY","gmtoffset":-18000},
    "timestamp":[1672756200,1672842600],
    "indicators":{"quote":[{
        "open":[130.28,126.89],"high":[130.90,128.66],"low":[124.17,125.08],
        "close":[125.07,126.36],"volume":[112117500,89113600]}]}
}],"error":null}}"#;

#[tokio::test]
async fn chart_payload_is_returned_under_requested_symbol() {
    let base = serve("200 OK", AAPL_CHART).await;
    let provider = YahooProvider::with_base_url(base).unwrap();

    let series = provider.fetch_bars(&params("aapl")).await.unwrap();

    assert_eq!(series.symbol, "aapl");
    assert_eq!(series.name.as_deref(), Some("Apple Inc."));
    assert_eq!(series.len(), 2);
    assert_eq!(
        series.bars[1].timestamp,
        Utc.with_ymd_and_hms(2023, 1, 4, 0, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn not_found_error_body_is_api_error() {
    let base = serve(
        "404 Not Found",
        r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
    )
    .await;
    let provider = YahooProvider::with_base_url(base).unwrap();

    let err = provider.fetch_bars(&params("NOPE")).await.unwrap_err();

    match err {
        ProviderError::Api { message, .. } => {
            assert!(message.starts_with("Not Found:"), "{message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_json_is_api_error() {
    let base = serve("500 Internal Server Error", "upstream exploded").await;
    let provider = YahooProvider::with_base_url(base).unwrap();

    let err = provider.fetch_bars(&params("AAPL")).await.unwrap_err();

    match err {
        ProviderError::Api { message, .. } => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("upstream exploded"), "{message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn null_result_is_empty_series() {
    let base = serve("200 OK", r#"{"chart":{"result":null,"error":null}}"#).await;
    let provider = YahooProvider::with_base_url(base).unwrap();

    let series = provider.fetch_bars(&params("AAPL")).await.unwrap();

    assert_eq!(series.symbol, "AAPL");
    assert!(series.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let base = serve("200 OK", r#"{"chart":"#).await;
    let provider = YahooProvider::with_base_url(base).unwrap();

    let err = provider.fetch_bars(&params("AAPL")).await.unwrap_err();

    assert!(matches!(err, ProviderError::Decode { .. }), "{err:?}");
}
