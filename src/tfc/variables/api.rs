//! Variable API operations

use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::tfc::payload::PayloadInput;
use crate::tfc::transport::Transport;
use crate::tfc::TfcClient;

use super::resolver::{find_variable_id, var_path, workspace_var_path, workspace_vars_path};
use super::VariableRef;

impl<T: Transport> TfcClient<T> {
    /// Get all variables of a workspace
    pub async fn list_workspace_vars(&self, workspace_id: &str) -> Result<Value> {
        self.get(&workspace_vars_path(workspace_id), &[]).await
    }

    /// Resolve a workspace variable to its request path
    ///
    /// Key references cost one list call before the path is known.
    pub async fn resolve_variable_path(
        &self,
        workspace_id: &str,
        variable: &VariableRef,
    ) -> Result<String> {
        let variable_id = match variable {
            VariableRef::Id(id) => id.clone(),
            VariableRef::Key(key) => {
                debug!(
                    "Looking up variable key '{}' in workspace '{}'",
                    key, workspace_id
                );
                let list = self.list_workspace_vars(workspace_id).await?;
                find_variable_id(&list, key)?
            }
        };
        Ok(workspace_var_path(workspace_id, &variable_id))
    }

    /// Update a variable of a workspace
    pub async fn update_workspace_var(
        &self,
        workspace_id: &str,
        variable: &VariableRef,
        payload: PayloadInput,
    ) -> Result<Value> {
        let path = self.resolve_variable_path(workspace_id, variable).await?;
        self.patch(&path, &payload.into_body()).await
    }

    /// Update a variable addressed by ID only
    pub async fn update_var(&self, variable_id: &str, payload: PayloadInput) -> Result<Value> {
        self.patch(&var_path(variable_id), &payload.into_body())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfcError;
    use crate::tfc::transport::StubTransport;
    use crate::tfc::ClientConfig;
    use reqwest::Method;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_workspace_vars() {
        let mock_server = MockServer::start().await;
        let client = TfcClient::test_client(&mock_server.uri());

        let body = json!({"data": [{"id": "var-1", "attributes": {"key": "a"}}]});

        Mock::given(method("GET"))
            .and(path("/api/v2/workspaces/ws-1/vars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert_eq!(client.list_workspace_vars("ws-1").await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_update_workspace_var_by_id_skips_lookup() {
        let mock_server = MockServer::start().await;
        let client = TfcClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/api/v2/workspaces/ws-1/vars/var-1"))
            .and(body_json(json!({"data": {"attributes": {"value": "x"}}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "var-1"}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client
            .update_workspace_var(
                "ws-1",
                &VariableRef::Id("var-1".into()),
                PayloadInput::Attributes(json!({"value": "x"})),
            )
            .await
            .unwrap();
        assert_eq!(result["data"]["id"], "var-1");
    }

    #[tokio::test]
    async fn test_update_workspace_var_by_key_lookup_then_patch() {
        let mock_server = MockServer::start().await;
        let client = TfcClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v2/workspaces/ws-1/vars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "var-9", "attributes": {"key": "var1"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let echo = json!({"data": {"id": "var-9", "attributes": {"key": "var1", "value": "v2"}}});
        Mock::given(method("PATCH"))
            .and(path("/api/v2/workspaces/ws-1/vars/var-9"))
            .and(body_json(json!({"data": {"attributes": {"value": "v2"}}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&echo))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client
            .update_workspace_var(
                "ws-1",
                &VariableRef::Key("var1".into()),
                PayloadInput::Data(json!({"attributes": {"value": "v2"}})),
            )
            .await
            .unwrap();
        assert_eq!(result, echo);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method.as_str(), "GET");
        assert_eq!(requests[1].method.as_str(), "PATCH");
    }

    #[tokio::test]
    async fn test_update_workspace_var_unknown_key_sends_no_patch() {
        let stub = StubTransport::new().reply(
            200,
            r#"{"data":[{"id":"var-1","attributes":{"key":"a"}}]}"#,
        );
        let client = TfcClient::with_transport(&ClientConfig::new("t"), stub).unwrap();

        let err = client
            .update_workspace_var(
                "ws-1",
                &VariableRef::Key("missing".into()),
                PayloadInput::Attributes(json!({"value": "x"})),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Variable with key missing not found.");
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
    }

    #[tokio::test]
    async fn test_update_workspace_var_lookup_failure_propagates() {
        let stub = StubTransport::new().reply(401, r#"{"errors":["unauthorized"]}"#);
        let client = TfcClient::with_transport(&ClientConfig::new("t"), stub).unwrap();

        let err = client
            .update_workspace_var(
                "ws-1",
                &VariableRef::Key("a".into()),
                PayloadInput::Attributes(json!({})),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TfcError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_update_var_by_id() {
        let mock_server = MockServer::start().await;
        let client = TfcClient::test_client(&mock_server.uri());

        let payload = json!({
            "data": {"type": "vars", "id": "var-5", "attributes": {"value": "n"}}
        });

        Mock::given(method("PATCH"))
            .and(path("/api/v2/vars/var-5"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client
            .update_var("var-5", PayloadInput::Payload(payload.clone()))
            .await
            .unwrap();
        assert_eq!(result, payload);
    }
}
