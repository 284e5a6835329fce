//! In-memory gateway used by command tests
//!
//! Serves `https://gw.test` like the API gateway and `https://storage.test`
//! like the storage service behind presigned URLs, and records every request.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use s3p_core::{
    API_KEY_HEADER, Credentials, Error, Gateway, HttpRequest, HttpResponse, HttpTransport, Method,
    Result,
};

pub(crate) const API_KEY: &str = "test-key";
const GATEWAY_HOST: &str = "gw.test";
const STORAGE_HOST: &str = "storage.test";

#[derive(Default)]
pub(crate) struct FakeGateway {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<HttpRequest>>,
    forced_status: Option<u16>,
}

impl FakeGateway {
    pub(crate) fn gateway() -> Gateway<FakeGateway> {
        Self::default().into_gateway()
    }

    /// A gateway answering every data request with `status`
    pub(crate) fn failing(status: u16) -> Gateway<FakeGateway> {
        Self {
            forced_status: Some(status),
            ..Default::default()
        }
        .into_gateway()
    }

    /// A gateway client holding the wrong API key, so every gateway call is refused
    pub(crate) fn unauthorized() -> Gateway<FakeGateway> {
        let credentials = Credentials::new("wrong-key", "https://gw.test/prod").unwrap();
        Gateway::new(Self::default(), credentials)
    }

    fn into_gateway(self) -> Gateway<FakeGateway> {
        let credentials = Credentials::new(API_KEY, "https://gw.test/prod").unwrap();
        Gateway::new(self, credentials)
    }

    pub(crate) fn insert(&self, path: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
    }

    pub(crate) fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn serve_gateway(&self, request: &HttpRequest) -> HttpResponse {
        if request.header_value(API_KEY_HEADER) != Some(API_KEY) {
            return HttpResponse::new(403, r#"{"message":"Forbidden"}"#);
        }

        let path = request.url.path();
        if path == "/prod/s3/list" {
            return HttpResponse::new(200, r#"[{"Name":"photos"}]"#);
        }

        let Some(object_path) = path.strip_prefix("/prod/s3/") else {
            return HttpResponse::new(404, "Not Found");
        };

        if request.url.query() == Some("presigned=true") {
            let url = format!("https://{STORAGE_HOST}/{object_path}?X-Amz-Signature=fake");
            return HttpResponse::new(200, format!(r#"{{"url":"{url}"}}"#));
        }

        self.serve_object(request, object_path)
    }

    fn serve_object(&self, request: &HttpRequest, object_path: &str) -> HttpResponse {
        if let Some(status) = self.forced_status {
            return HttpResponse::new(status, "Internal Server Error");
        }

        let mut objects = self.objects.lock().unwrap();
        if request.method == Method::GET {
            match objects.get(object_path) {
                Some(data) => HttpResponse::new(200, data.clone()),
                None => HttpResponse::new(404, "NoSuchKey"),
            }
        } else if request.method == Method::PUT {
            let data = request.body.clone().unwrap_or_default();
            objects.insert(object_path.to_string(), data);
            HttpResponse::new(200, r#""Object created""#)
        } else if request.method == Method::DELETE {
            objects.remove(object_path);
            HttpResponse::new(204, "")
        } else {
            HttpResponse::new(405, "Method Not Allowed")
        }
    }
}

#[async_trait]
impl HttpTransport for FakeGateway {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());

        match request.url.host_str() {
            Some(GATEWAY_HOST) => Ok(self.serve_gateway(&request)),
            Some(STORAGE_HOST) => {
                let object_path = request.url.path().trim_start_matches('/').to_string();
                Ok(self.serve_object(&request, &object_path))
            }
            _ => Err(Error::Network(format!("unknown host: {}", request.url))),
        }
    }
}
