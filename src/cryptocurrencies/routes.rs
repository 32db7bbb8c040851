use std::sync::Arc;

use axum::Router;

use crate::cryptocurrencies::{handler, repository::StoreFactory};

/// Every method and path lands on the list handler.
pub fn cryptocurrency_routes(stores: Arc<dyn StoreFactory>) -> Router {
    Router::new()
        .fallback(handler::list_cryptocurrencies)
        .with_state(stores)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        cryptocurrencies::{
            model::{Cryptocurrency, ListRes},
            repository::CryptocurrencyStore,
        },
        error::AppError,
    };

    const ERROR_BODY: &str =
        r#"{"code":"SERVER_ERROR","message":"failed to get cryptocurrencies"}"#;

    #[derive(Clone, Copy)]
    enum Outcome {
        Records(usize),
        NanPrice,
        QueryFails,
        Malformed,
        OpenFails,
    }

    struct FakeStore(Outcome);

    #[async_trait]
    impl CryptocurrencyStore for FakeStore {
        async fn list(&self) -> Result<Vec<ListRes>, AppError> {
            match self.0 {
                Outcome::Records(n) => Ok(sample(n)),
                Outcome::NanPrice => {
                    let mut records = sample(2);
                    records[1].data.price = f32::NAN;
                    Ok(records)
                }
                Outcome::QueryFails => Err(AppError::Query("connection refused".into())),
                Outcome::Malformed => {
                    Err(AppError::MalformedResponse("missing field `data`".into()))
                }
                Outcome::OpenFails => unreachable!(),
            }
        }
    }

    struct FakeFactory {
        outcome: Mutex<Outcome>,
        opened: AtomicUsize,
    }

    impl FakeFactory {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(outcome),
                opened: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl StoreFactory for FakeFactory {
        async fn open(&self) -> Result<Box<dyn CryptocurrencyStore>, AppError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            match *self.outcome.lock().unwrap() {
                Outcome::OpenFails => Err(AppError::StoreInit("MONGODB_URI is not set".into())),
                outcome => Ok(Box::new(FakeStore(outcome))),
            }
        }
    }

    fn sample(n: usize) -> Vec<ListRes> {
        (0..n)
            .map(|i| ListRes {
                data: Cryptocurrency {
                    name: format!("Coin {}", i),
                    price: i as f32 + 0.5,
                    symbol: format!("C{}", i),
                },
            })
            .collect()
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn lists_every_record() {
        let app = cryptocurrency_routes(FakeFactory::new(Outcome::Records(3)));
        let (status, body) = call(app, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!([
                { "data": { "name": "Coin 0", "price": 0.5, "symbol": "C0" } },
                { "data": { "name": "Coin 1", "price": 1.5, "symbol": "C1" } },
                { "data": { "name": "Coin 2", "price": 2.5, "symbol": "C2" } },
            ])
        );
    }

    #[tokio::test]
    async fn empty_collection_is_empty_array() {
        let app = cryptocurrency_routes(FakeFactory::new(Outcome::Records(0)));
        assert_eq!(call(app, get("/")).await, (StatusCode::OK, "[]".to_string()));
    }

    #[tokio::test]
    async fn failures_render_the_error_body() {
        for outcome in [
            Outcome::NanPrice,
            Outcome::QueryFails,
            Outcome::Malformed,
            Outcome::OpenFails,
        ] {
            let app = cryptocurrency_routes(FakeFactory::new(outcome));
            let (status, body) = call(app, get("/")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, ERROR_BODY);
        }
    }

    #[tokio::test]
    async fn open_failure_does_not_poison_later_requests() {
        let factory = FakeFactory::new(Outcome::OpenFails);
        let app = cryptocurrency_routes(factory.clone());

        let (_, body) = call(app.clone(), get("/")).await;
        assert_eq!(body, ERROR_BODY);

        *factory.outcome.lock().unwrap() = Outcome::Records(1);
        let (_, body) = call(app, get("/")).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap().as_array().unwrap().len(), 1);
        assert_eq!(factory.opened.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn responses_are_json() {
        let app = cryptocurrency_routes(FakeFactory::new(Outcome::Records(1)));
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn request_shape_is_ignored() {
        let app = cryptocurrency_routes(FakeFactory::new(Outcome::Records(2)));
        let (_, expected) = call(app.clone(), get("/")).await;

        let requests = vec![
            get("/anything/at/all?limit=1&cursor=abc"),
            Request::builder()
                .method(Method::POST)
                .uri("/cryptocurrencies")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer token")
                .body(Body::from(r#"{"symbol":"BTC"}"#))
                .unwrap(),
            Request::builder()
                .method(Method::DELETE)
                .uri("/x")
                .body(Body::from("not json"))
                .unwrap(),
        ];

        for request in requests {
            assert_eq!(call(app.clone(), request).await, (StatusCode::OK, expected.clone()));
        }
    }
}
