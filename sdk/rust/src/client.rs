use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// A function response, fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

impl FunctionResponse {
    async fn read(resp: reqwest::Response) -> Result<Self, reqwest::Error> {
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let status = resp.status().as_u16();
        let content_type = header(CONTENT_TYPE.as_str());
        let request_id = header("x-request-id");
        let body = resp.text().await?;

        Ok(Self {
            status,
            content_type,
            request_id,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a JSON body relayed from the upstream.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub struct FunctionClient {
    client: Client,
    base_url: String,
    forward_path: String,
    greeting_path: String,
}

impl FunctionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            forward_path: "/api/SaludoFunction".to_string(),
            greeting_path: "/api/Greeting".to_string(),
        }
    }

    /// Use a preconfigured HTTP client.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Use non-default route paths.
    pub fn with_paths(mut self, forward_path: &str, greeting_path: &str) -> Self {
        self.forward_path = forward_path.to_string();
        self.greeting_path = greeting_path.to_string();
        self
    }

    /// Invoke the forwarding function, optionally passing `nombre`.
    pub async fn saludo(&self, nombre: Option<&str>) -> Result<FunctionResponse, reqwest::Error> {
        let mut req = self
            .client
            .get(format!("{}{}", self.base_url, self.forward_path));
        if let Some(nombre) = nombre {
            req = req.query(&[("nombre", nombre)]);
        }
        FunctionResponse::read(req.send().await?).await
    }

    /// Invoke the greeting function.
    pub async fn greeting(&self) -> Result<FunctionResponse, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, self.greeting_path))
            .send()
            .await?;
        FunctionResponse::read(resp).await
    }
}
