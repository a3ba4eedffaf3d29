use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::client::token_manager::CredentialScope;
use crate::client::WecomClient;
use crate::error::WecomError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::AUTH_ERROR_CODES;

impl WecomClient {
    /// Perform an authenticated API call and decode its payload.
    ///
    /// The access token always travels as the `access_token` query
    /// parameter, for POSTs with a JSON body too. Success is decided by
    /// the body's `errcode`: absent, null or zero means success. An
    /// auth-family code drops the cached token before the error is
    /// returned; the failing call itself is never retried here.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        scope: CredentialScope,
        query: &[(&str, &str)],
        json_body: Option<&Value>,
    ) -> Result<T, WecomError> {
        let metrics = get_metrics().await;
        let secret = self.secret_for(scope);
        let token = self.tokens.get_valid_token(scope, secret).await?;

        metrics.api_requests.with_label_values(&[path, method.as_str()]).inc();
        let start = get_instant();

        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .query(&[("access_token", token.as_str())])
            .query(query);
        if let Some(body) = json_body {
            request = request.json(body);
        }

        // the request URL carries the access token; strip it from error text
        let response = request.send().await.map_err(|e| {
            metrics.api_failures.with_label_values(&[path, "transport"]).inc();
            WecomError::Transport(e.without_url().to_string())
        })?;
        let payload: Value = response.json().await.map_err(|e| {
            metrics.api_failures.with_label_values(&[path, "decode"]).inc();
            WecomError::Transport(e.without_url().to_string())
        })?;
        metrics
            .api_request_duration
            .with_label_values(&[path])
            .observe(start.elapsed().as_secs_f64());

        let errcode = payload.get("errcode").and_then(Value::as_i64).unwrap_or(0);
        if errcode != 0 {
            let errmsg = payload
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_owned();

            if AUTH_ERROR_CODES.contains(&errcode) {
                metrics.api_failures.with_label_values(&[path, "auth"]).inc();
                error!("call to {} rejected with auth code {}: {}", path, errcode, errmsg);
                self.tokens.invalidate(scope, secret).await;
                return Err(WecomError::Auth {
                    code: Some(errcode),
                    message: errmsg,
                });
            }

            metrics.api_failures.with_label_values(&[path, "api"]).inc();
            error!("call to {} failed with code {}: {}", path, errcode, errmsg);
            return Err(WecomError::Api {
                code: errcode,
                message: errmsg,
            });
        }

        debug!("call to {} succeeded", path);
        serde_json::from_value(payload).map_err(|e| {
            metrics.api_failures.with_label_values(&[path, "decode"]).inc();
            WecomError::Transport(format!("unexpected response shape: {}", e))
        })
    }
}
