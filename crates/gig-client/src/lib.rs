use std::time::Duration;

use anyhow::Context;
use gig_types::domain::order::{Order, OrderDetails};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct GigClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Typed client for the gig backend. Non-2xx responses become errors
/// carrying the `reqwest::StatusCode`.
#[derive(Clone)]
pub struct GigClient {
    base: Url,
    client: reqwest::Client,
}

impl GigClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<GigClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(GigClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn register(&self, req: &RegisterRequest) -> anyhow::Result<MessageResponse> {
        let res = self
            .client
            .post(self.url("register")?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Succeeds only for valid credentials; the server hands back no token.
    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<MessageResponse> {
        let res = self
            .client
            .post(self.url("login")?)
            .json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn create_order(&self, details: &OrderDetails) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("order")?)
            .json(details)
            .send()
            .await?
            .error_for_status()?;
        let order: Order = res.json().await?;
        tracing::debug!(order_id = order.id, "created order");
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("order/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .client
            .get(self.url("orders")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Same result as `list_orders`, reached through the `/view_orders` redirect.
    pub async fn view_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .client
            .get(self.url("view_orders")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_order(&self, id: i64, details: &OrderDetails) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("order/{id}"))?)
            .json(details)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_order(&self, id: i64) -> anyhow::Result<MessageResponse> {
        let res = self
            .client
            .delete(self.url(&format!("order/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl GigClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<GigClient> {
        if let Some(client) = self.client {
            return Ok(GigClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(GigClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Status code of a failed call, if the failure came from the server.
pub fn error_status(err: &anyhow::Error) -> Option<reqwest::StatusCode> {
    err.downcast_ref::<reqwest::Error>().and_then(|e| e.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_details() -> OrderDetails {
        OrderDetails {
            description: "box".into(),
            contact: "555-1234".into(),
            pickup_location: "A".into(),
            delivery_location: "B".into(),
            delivery_time: "10:00".into(),
            delivery_date: "2024-01-01".into(),
        }
    }

    fn sample_order() -> Order {
        Order::new(1, sample_details())
    }

    #[tokio::test]
    async fn create_and_get_order() {
        let server = MockServer::start();
        let order = sample_order();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/order")
                .json_body_obj(&sample_details());
            then.status(201).json_body_obj(&order);
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/order/1");
            then.status(200).json_body_obj(&order);
        });

        let client = GigClient::new(&server.base_url()).unwrap();
        let created = client.create_order(&sample_details()).await.unwrap();
        assert_eq!(created, order);

        let fetched = client.get_order(1).await.unwrap();
        assert_eq!(fetched.contact, order.contact);

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn list_update_delete() {
        let server = MockServer::start();
        let order = sample_order();
        let mut replacement = sample_details();
        replacement.description = "crate".into();

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/orders");
            then.status(200).json_body_obj(&vec![order.clone()]);
        });

        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path("/order/1")
                .json_body_obj(&replacement);
            then.status(200)
                .json_body_obj(&Order::new(1, replacement.clone()));
        });

        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/order/1");
            then.status(200)
                .json_body(serde_json::json!({ "message": "Order deleted successfully" }));
        });

        let client = GigClient::new(&server.base_url()).unwrap();
        let listed = client.list_orders().await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = client.update_order(1, &replacement).await.unwrap();
        assert_eq!(updated.description, "crate");

        let deleted = client.delete_order(1).await.unwrap();
        assert_eq!(deleted.message, "Order deleted successfully");

        list_mock.assert();
        update_mock.assert();
        delete_mock.assert();
    }

    #[tokio::test]
    async fn register_and_login_surface_status_codes() {
        let server = MockServer::start();
        let req = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "pw".into(),
        };

        let register_mock = server.mock(|when, then| {
            when.method(POST).path("/register").json_body_obj(&req);
            then.status(201)
                .json_body(serde_json::json!({ "message": "User registered successfully" }));
        });

        let login_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/login")
                .json_body(serde_json::json!({ "email": "alice@example.com", "password": "bad" }));
            then.status(401)
                .json_body(serde_json::json!({ "message": "Invalid email or password" }));
        });

        let client = GigClient::new(&server.base_url()).unwrap();
        let registered = client.register(&req).await.unwrap();
        assert_eq!(registered.message, "User registered successfully");

        let err = client.login("alice@example.com", "bad").await.unwrap_err();
        assert_eq!(error_status(&err), Some(reqwest::StatusCode::UNAUTHORIZED));

        register_mock.assert();
        login_mock.assert();
    }
}
