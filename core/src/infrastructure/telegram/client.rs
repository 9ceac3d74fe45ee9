use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

use crate::{
    domain::{
        common::{TelegramConfig, entities::app_errors::CoreError},
        conversation::{entities::Keyboard, ports::ChatTransport},
    },
    infrastructure::telegram::mappers::ReplyMarkup,
};

/// Largest photo the bot is willing to download.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Error description returned when an edit would not change anything.
const NOT_MODIFIED: &str = "message is not modified";

#[derive(Debug, Clone)]
pub struct TelegramClient {
    api_url: String,
    bot_token: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<R> {
    ok: bool,
    result: Option<R>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage {
    chat_id: i64,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
struct EditMessageText {
    chat_id: i64,
    message_id: i64,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
struct GetFile {
    file_id: String,
}

#[derive(Debug, Deserialize)]
struct File {
    file_path: Option<String>,
    file_size: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery {
    callback_query_id: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            client: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.bot_token, file_path)
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, CoreError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(method, "Telegram request failed: {}", e);
                CoreError::ExternalServiceError(format!("Telegram API error: {}", e))
            })?;

        let status = response.status();
        let envelope: ApiResponse<R> = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(method, %status, "Failed to parse Telegram response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse Telegram response: {}", e))
        })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => {
                let description = description.unwrap_or_else(|| status.to_string());
                Err(CoreError::ExternalServiceError(description))
            }
        }
    }
}

impl ChatTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> Result<(), CoreError> {
        let body = SendMessage {
            chat_id,
            text,
            reply_markup: keyboard.map(ReplyMarkup::from),
        };

        self.call::<_, serde_json::Value>("sendMessage", &body)
            .await
            .map_err(|e| {
                error!(chat_id, "sendMessage failed: {}", e);
                e
            })?;
        debug!(chat_id, "message sent");
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> Result<(), CoreError> {
        let body = EditMessageText {
            chat_id,
            message_id,
            text,
            reply_markup: keyboard.map(ReplyMarkup::from),
        };

        match self
            .call::<_, serde_json::Value>("editMessageText", &body)
            .await
        {
            Ok(_) => Ok(()),
            Err(CoreError::ExternalServiceError(description))
                if description.contains(NOT_MODIFIED) =>
            {
                debug!(chat_id, message_id, "edit left the message unchanged");
                Ok(())
            }
            Err(e) => {
                error!(chat_id, message_id, "editMessageText failed: {}", e);
                Err(e)
            }
        }
    }

    async fn download_photo(&self, file_id: String) -> Result<Vec<u8>, CoreError> {
        let file: File = self.call("getFile", &GetFile { file_id }).await?;

        if file.file_size.is_some_and(|size| size > MAX_PHOTO_BYTES) {
            warn!(size = file.file_size, "photo exceeds the download limit");
            return Err(CoreError::Invalid);
        }
        let file_path = file.file_path.ok_or_else(|| {
            CoreError::ExternalServiceError("file is not available for download".to_string())
        })?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                let e = e.without_url();
                error!("Photo download failed: {}", e);
                CoreError::ExternalServiceError(format!("Photo download failed: {}", e))
            })?;

        let bytes = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to read photo body: {}", e);
            CoreError::ExternalServiceError(format!("Failed to read photo: {}", e))
        })?;

        if bytes.len() as u64 > MAX_PHOTO_BYTES {
            warn!(size = bytes.len(), "photo exceeds the download limit");
            return Err(CoreError::Invalid);
        }

        Ok(bytes.to_vec())
    }

    async fn answer_callback(&self, callback_id: String) -> Result<(), CoreError> {
        let body = AnswerCallbackQuery {
            callback_query_id: callback_id,
        };

        self.call::<_, bool>("answerCallbackQuery", &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> TelegramClient {
        TelegramClient::new(&TelegramConfig {
            bot_token: "123:abc".to_string(),
            api_url: "https://api.telegram.org/".to_string(),
        })
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert_eq!(
            client.file_url("photos/file_1.jpg"),
            "https://api.telegram.org/file/bot123:abc/photos/file_1.jpg"
        );
    }

    #[test]
    fn test_send_message_body() {
        let body = SendMessage {
            chat_id: 42,
            text: "hi".to_string(),
            reply_markup: None,
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "chat_id": 42, "text": "hi" })
        );
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message is not modified"
        }))
        .unwrap();

        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert!(envelope.description.unwrap().contains(NOT_MODIFIED));
    }
}
