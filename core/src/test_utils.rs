use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::{entities::Keyboard, ports::ChatTransport},
    history::{entities::RecipeHistoryEntry, ports::RecipeHistoryRepository},
    llm::ports::LLMClient,
    preferences::{
        entities::UserPreferences, ports::PreferencesRepository, value_objects::PreferenceUpdate,
    },
    user::{entities::User, ports::UserRepository},
};
use crate::infrastructure::session::memory::InMemorySessionRepository;

#[derive(Debug, Clone, Default)]
pub struct FakeUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl FakeUserRepository {
    pub fn with_user(external_id: &str) -> Self {
        let repository = Self::default();
        repository.insert(external_id);
        repository
    }

    fn insert(&self, external_id: &str) -> User {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i64 + 1,
            external_id: external_id.to_string(),
            name: None,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        user
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for FakeUserRepository {
    async fn get_by_external_id(&self, external_id: String) -> Result<Option<User>, CoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.external_id == external_id)
            .cloned())
    }

    async fn create(&self, external_id: String, name: Option<String>) -> Result<User, CoreError> {
        let mut user = self.insert(&external_id);
        user.name = name;
        Ok(user)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePreferencesRepository {
    records: Arc<Mutex<HashMap<i64, UserPreferences>>>,
}

impl FakePreferencesRepository {
    pub fn with(preferences: UserPreferences) -> Self {
        let repository = Self::default();
        repository
            .records
            .lock()
            .unwrap()
            .insert(preferences.user_id, preferences);
        repository
    }

    pub fn stored(&self, user_id: i64) -> Option<UserPreferences> {
        self.records.lock().unwrap().get(&user_id).cloned()
    }
}

impl PreferencesRepository for FakePreferencesRepository {
    async fn get_or_create(&self, user_id: i64) -> Result<UserPreferences, CoreError> {
        let mut records = self.records.lock().unwrap();
        let next_id = records.len() as i64 + 1;
        Ok(records
            .entry(user_id)
            .or_insert_with(|| UserPreferences {
                id: next_id,
                ..UserPreferences::defaults_for(user_id)
            })
            .clone())
    }

    async fn update(
        &self,
        user_id: i64,
        update: PreferenceUpdate,
    ) -> Result<UserPreferences, CoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(user_id)
            .or_insert_with(|| UserPreferences::defaults_for(user_id));
        match update {
            PreferenceUpdate::HealthyProfile(value) => record.healthy_profile = value,
            PreferenceUpdate::PreferredCuisine(value) => record.preferred_cuisine = value,
            PreferenceUpdate::Difficulty(value) => record.difficulty = value,
        }
        Ok(record.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeHistoryRepository {
    entries: Arc<Mutex<Vec<RecipeHistoryEntry>>>,
    failing: bool,
}

impl FakeHistoryRepository {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<RecipeHistoryEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl RecipeHistoryRepository for FakeHistoryRepository {
    async fn append(
        &self,
        user_id: i64,
        ingredients: String,
        recipe: String,
    ) -> Result<RecipeHistoryEntry, CoreError> {
        if self.failing {
            return Err(CoreError::InternalServerError);
        }
        let mut entries = self.entries.lock().unwrap();
        let entry = RecipeHistoryEntry {
            id: entries.len() as i64 + 1,
            user_id,
            ingredients,
            recipe,
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<RecipeHistoryEntry>, CoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|entry| entry.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        user_id: i64,
        entry_id: i64,
    ) -> Result<Option<RecipeHistoryEntry>, CoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|entry| entry.id == entry_id && entry.user_id == user_id)
            .cloned())
    }
}

type Script = Arc<Mutex<VecDeque<Result<String, CoreError>>>>;

/// LLM double answering from queues and recording every generation prompt.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLLMClient {
    vision_answers: Script,
    text_answers: Script,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLLMClient {
    pub fn push_vision(&self, answer: Result<&str, CoreError>) {
        self.vision_answers
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
    }

    pub fn push_text(&self, answer: Result<&str, CoreError>) {
        self.text_answers
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(script: &Script) -> Result<String, CoreError> {
        script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(CoreError::ExternalServiceError(
                "no scripted answer".to_string(),
            ))
        })
    }
}

impl LLMClient for ScriptedLLMClient {
    async fn generate_with_image(
        &self,
        _prompt: String,
        _image_data: Vec<u8>,
    ) -> Result<String, CoreError> {
        Self::next(&self.vision_answers)
    }

    async fn generate_with_text(&self, prompt: String) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        Self::next(&self.text_answers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message {
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edit {
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    CallbackAnswer(String),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    outbound: Arc<Mutex<Vec<Outbound>>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Outbound> {
        self.outbound.lock().unwrap().clone()
    }

    /// Texts of sent (not edited) messages.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|outbound| match outbound {
                Outbound::Message { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<(String, Option<Keyboard>)> {
        self.sent().into_iter().rev().find_map(|outbound| match outbound {
            Outbound::Message { text, keyboard, .. } => Some((text, keyboard)),
            _ => None,
        })
    }

    pub fn edits(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|outbound| match outbound {
                Outbound::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.outbound.lock().unwrap().clear();
    }
}

impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> Result<(), CoreError> {
        self.outbound.lock().unwrap().push(Outbound::Message {
            chat_id,
            text,
            keyboard,
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> Result<(), CoreError> {
        self.outbound.lock().unwrap().push(Outbound::Edit {
            chat_id,
            message_id,
            text,
            keyboard,
        });
        Ok(())
    }

    async fn download_photo(&self, _file_id: String) -> Result<Vec<u8>, CoreError> {
        Ok(vec![0xFF, 0xD8, 0xFF])
    }

    async fn answer_callback(&self, callback_id: String) -> Result<(), CoreError> {
        self.outbound
            .lock()
            .unwrap()
            .push(Outbound::CallbackAnswer(callback_id));
        Ok(())
    }
}

pub type TestService<L> = Service<
    FakeUserRepository,
    FakePreferencesRepository,
    FakeHistoryRepository,
    InMemorySessionRepository,
    L,
    RecordingTransport,
>;

pub fn service_with_llm<L: LLMClient>(llm: L, transport: RecordingTransport) -> TestService<L> {
    Service::new(
        FakeUserRepository::default(),
        FakePreferencesRepository::default(),
        FakeHistoryRepository::default(),
        InMemorySessionRepository::default(),
        llm,
        transport,
        Duration::from_secs(2),
    )
}
