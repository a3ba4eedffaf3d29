use http::Method;
use serde_json::{Map, Value};
use tracing::info;

use crate::client::token_manager::CredentialScope;
use crate::client::types::{
    DeliveryReceipt, DomainIpList, OutgoingMessage, SendMessageRequest, UserProfile,
};
use crate::client::WecomClient;
use crate::error::WecomError;
use crate::utils::constants::{PATH_API_DOMAIN_IP, PATH_MESSAGE_SEND, PATH_USER_GET};

impl WecomClient {
    /// Send a text or markdown message to users, parties and/or tags.
    ///
    /// At least one recipient selector must be set, where blank ones
    /// count as unset; the check happens before any token work.
    /// Selectors the remote rejects do not fail the call, they come
    /// back in the receipt.
    pub async fn send_message(
        &self,
        message: &OutgoingMessage,
    ) -> Result<DeliveryReceipt, WecomError> {
        if !selector_is_set(&message.to_user)
            && !selector_is_set(&message.to_party)
            && !selector_is_set(&message.to_tag)
        {
            return Err(WecomError::InvalidRequest(
                "at least one of to_user, to_party, to_tag must be set".to_owned(),
            ));
        }

        let payload =
            SendMessageRequest::build(message, self.config.agent_id, self.config.safe_mode);
        let body = serde_json::to_value(&payload)?;
        let receipt: DeliveryReceipt = self
            .execute(
                Method::POST,
                PATH_MESSAGE_SEND,
                CredentialScope::Messaging,
                &[],
                Some(&body),
            )
            .await?;
        info!("message sent, msgtype '{}'", message.msg_type.as_str());
        Ok(receipt)
    }

    /// Fetch a directory profile by user id, with the `errcode`/`errmsg`
    /// envelope fields stripped from the result.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, WecomError> {
        if user_id.trim().is_empty() {
            return Err(WecomError::InvalidRequest(
                "user_id must not be empty".to_owned(),
            ));
        }

        let mut profile: Map<String, Value> = self
            .execute(
                Method::GET,
                PATH_USER_GET,
                CredentialScope::Contacts,
                &[("userid", user_id)],
                None,
            )
            .await?;
        profile.remove("errcode");
        profile.remove("errmsg");
        Ok(profile)
    }

    /// Validate that the remote API is reachable and the credential
    /// works. Read-only, no side effects.
    pub async fn probe_connectivity(&self) -> Result<DomainIpList, WecomError> {
        self.execute(
            Method::GET,
            PATH_API_DOMAIN_IP,
            CredentialScope::Contacts,
            &[],
            None,
        )
        .await
    }
}

// blank and whitespace-only selectors behave as unset
fn selector_is_set(value: &Option<String>) -> bool {
    value.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()).is_some()
}
