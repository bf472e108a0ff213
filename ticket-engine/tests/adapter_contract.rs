use ticket_engine::{AdapterError, ResilienceEnvelope};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Verifies the resilience envelope's retry behavior against a generic HTTP
/// stub rather than any one marketplace's wire format: the first call gets a
/// 503, the second a 200, and the envelope should surface the eventual
/// success without the caller ever seeing the transient failure.
#[tokio::test]
async fn envelope_retries_a_flaky_upstream_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/events", server.uri());
    let envelope = ResilienceEnvelope::new("wiremock-stub");

    let result: Result<String, AdapterError> = envelope
        .run(|| {
            let client = client.clone();
            let url = url.clone();
            async move {
                let response = client.get(&url).send().await.map_err(|e| AdapterError::NetworkError {
                    platform: "wiremock-stub".into(),
                    message: e.to_string(),
                })?;
                if response.status().as_u16() == 503 {
                    return Err(AdapterError::ServerError { platform: "wiremock-stub".into(), status: 503 });
                }
                response.text().await.map_err(|e| AdapterError::NetworkError {
                    platform: "wiremock-stub".into(),
                    message: e.to_string(),
                })
            }
        })
        .await;

    assert_eq!(result.unwrap(), "ok");
}

/// A consistently failing upstream should trip the breaker after enough
/// consecutive failures, after which the envelope short-circuits without
/// making another request against the stub.
#[tokio::test]
async fn envelope_opens_the_breaker_against_a_consistently_failing_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/events", server.uri());
    let envelope = ResilienceEnvelope::new("wiremock-flaky");

    for _ in 0..5 {
        let _: Result<String, AdapterError> = envelope
            .run(|| {
                let client = client.clone();
                let url = url.clone();
                async move {
                    let response = client.get(&url).send().await.map_err(|e| AdapterError::NetworkError {
                        platform: "wiremock-flaky".into(),
                        message: e.to_string(),
                    })?;
                    Err(AdapterError::ServerError { platform: "wiremock-flaky".into(), status: response.status().as_u16() })
                }
            })
            .await;
    }

    let result: Result<String, AdapterError> = envelope.run(|| async { Ok("unused".to_string()) }).await;
    assert!(matches!(result, Err(AdapterError::CircuitOpen { .. })));
}
