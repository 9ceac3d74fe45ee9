use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        services::{HISTORY_PAGE_SIZE, Service},
    },
    conversation::{
        commands::{
            CallbackAction, cuisine_options_keyboard, difficulty_menu,
            difficulty_options_keyboard, menu, settings_keyboard, settings_text,
        },
        entities::{CallbackQuery, InboundMessage, InlineButton, Keyboard},
        ports::{ChatTransport, ConversationService},
        texts,
        transitions::{IngredientSource, Step, plan},
    },
    history::{entities::RecipeHistoryEntry, ports::RecipeHistoryRepository},
    ingredients::ports::IngredientService,
    llm::ports::LLMClient,
    preferences::{
        entities::UserPreferences,
        ports::PreferencesRepository,
        value_objects::{Difficulty, PreferenceUpdate},
    },
    recipe::{
        ports::RecipeService,
        value_objects::{RecipeOutcome, RecipeRequest},
    },
    session::{
        entities::{ConversationState, Session},
        ports::SessionRepository,
    },
    user::{entities::User, ports::UserRepository, services::get_or_create_user},
};

enum IngredientEdit {
    Add(Vec<String>),
    Remove(Vec<String>),
}

impl<U, P, H, S, LLM, T> Service<U, P, H, S, LLM, T>
where
    U: UserRepository,
    P: PreferencesRepository,
    H: RecipeHistoryRepository,
    S: SessionRepository,
    LLM: LLMClient,
    T: ChatTransport,
{
    async fn reply(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) {
        if let Err(e) = self
            .transport
            .send_message(chat_id, text.to_string(), keyboard)
            .await
        {
            error!(chat_id, "Failed to send message: {}", e);
        }
    }

    async fn edit(&self, chat_id: i64, message_id: i64, text: &str, keyboard: Option<Keyboard>) {
        if let Err(e) = self
            .transport
            .edit_message(chat_id, message_id, text.to_string(), keyboard)
            .await
        {
            error!(chat_id, message_id, "Failed to edit message: {}", e);
        }
    }

    async fn persist(&self, chat_id: i64, session: &Session) {
        if let Err(e) = self.session_repository.set(chat_id, session.clone()).await {
            error!(chat_id, "Failed to store session: {}", e);
        }
    }

    async fn move_to(&self, chat_id: i64, mut session: Session, state: ConversationState) -> Session {
        info!(chat_id, from = ?session.state, to = ?state, "state transition");
        match self.session_repository.set_state(chat_id, state).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(chat_id, "Failed to store state: {}", e);
                session.state = state;
                session
            }
        }
    }

    async fn register(&self, message: &InboundMessage) {
        if let Err(e) = get_or_create_user(
            &self.user_repository,
            &message.chat_id.to_string(),
            message.sender_name.clone(),
        )
        .await
        {
            error!(chat_id = message.chat_id, "Failed to register user: {}", e);
        }
    }

    /// Err carries the notice to show instead.
    async fn require_user(&self, chat_id: i64) -> Result<User, &'static str> {
        match self
            .user_repository
            .get_by_external_id(chat_id.to_string())
            .await
        {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                warn!(chat_id, "no user registered for chat");
                Err(texts::USER_NOT_FOUND)
            }
            Err(e) => {
                error!(chat_id, "Failed to look up user: {}", e);
                Err(texts::SOMETHING_WENT_WRONG)
            }
        }
    }

    async fn load_preferences(&self, chat_id: i64) -> Option<UserPreferences> {
        let user = self.require_user(chat_id).await.ok()?;
        match self.preferences_repository.get_or_create(user.id).await {
            Ok(preferences) => Some(preferences),
            Err(e) => {
                error!(chat_id, "Failed to load preferences: {}", e);
                None
            }
        }
    }

    async fn load_session(&self, message: &InboundMessage) -> Session {
        let chat_id = message.chat_id;
        match self.session_repository.get(chat_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                info!(chat_id, "starting new session");
                self.register(message).await;
                let session = Session::default();
                self.persist(chat_id, &session).await;
                session
            }
            Err(CoreError::CorruptSession(reason)) => {
                warn!(chat_id, reason = %reason, "unreadable session");
                Session::in_state(ConversationState::Unknown)
            }
            Err(e) => {
                error!(chat_id, "Failed to load session: {}", e);
                Session::default()
            }
        }
    }

    async fn show_list(&self, chat_id: i64, session: &Session, notice: &str) {
        let list = if session.ingredients.is_empty() {
            texts::EMPTY_LIST.to_string()
        } else {
            session.ingredient_list()
        };
        let text = format!("{}\n{}\n{}", notice, list, texts::CONFIRM_QUESTION);
        self.reply(chat_id, &text, Some(menu(ConversationState::Confirming)))
            .await;
    }

    /// Atomic merge into the stored list, then CONFIRMING.
    async fn edit_ingredients(
        &self,
        chat_id: i64,
        mut session: Session,
        edit: IngredientEdit,
    ) -> Session {
        let merged = match &edit {
            IngredientEdit::Add(names) => {
                self.session_repository
                    .merge_add(chat_id, names.clone())
                    .await
            }
            IngredientEdit::Remove(names) => {
                self.session_repository
                    .merge_remove(chat_id, names.clone())
                    .await
            }
        };

        match merged {
            Ok(stored) => self.move_to(chat_id, stored, ConversationState::Confirming).await,
            Err(e) => {
                error!(chat_id, "Failed to merge ingredients: {}", e);
                match edit {
                    IngredientEdit::Add(names) => {
                        session.add_ingredients(names);
                    }
                    IngredientEdit::Remove(names) => {
                        session.remove_ingredients(&names);
                    }
                }
                session.state = ConversationState::Confirming;
                session
            }
        }
    }

    async fn remove_ingredient(
        &self,
        chat_id: i64,
        session: Session,
        requested: &str,
        existing: Option<String>,
    ) -> Session {
        match existing {
            Some(existing) => {
                let session = self
                    .edit_ingredients(chat_id, session, IngredientEdit::Remove(vec![existing]))
                    .await;
                self.show_list(chat_id, &session, &texts::ingredient_removed(requested))
                    .await;
                session
            }
            None => {
                info!(chat_id, requested, "ingredient to remove not found");
                let session = self
                    .move_to(chat_id, session, ConversationState::Confirming)
                    .await;
                self.show_list(chat_id, &session, &texts::ingredient_not_found(requested))
                    .await;
                session
            }
        }
    }

    async fn extract(&self, chat_id: i64, session: Session, source: IngredientSource) -> Session {
        let names = match source {
            IngredientSource::Text(text) => self.extract_from_text(&text),
            IngredientSource::Photo { file_id } => {
                self.reply(chat_id, texts::PHOTO_RECEIVED, None).await;
                match self.transport.download_photo(file_id).await {
                    Ok(bytes) => self.extract_from_image(bytes).await,
                    Err(e) => {
                        error!(chat_id, "Failed to download photo: {}", e);
                        Vec::new()
                    }
                }
            }
        };

        if names.is_empty() {
            info!(chat_id, "no ingredients recognised");
            self.reply(chat_id, texts::NOTHING_RECOGNISED, Some(menu(session.state)))
                .await;
            return session;
        }

        info!(chat_id, count = names.len(), "ingredients recognised");
        let session = self
            .edit_ingredients(chat_id, session, IngredientEdit::Add(names))
            .await;
        self.show_list(chat_id, &session, texts::RECOGNISED_HEADER)
            .await;
        session
    }

    async fn generate(
        &self,
        ingredients: Vec<String>,
        preferences: Option<UserPreferences>,
        difficulty: Option<Difficulty>,
    ) -> RecipeOutcome {
        let mut request = RecipeRequest::new(ingredients).with_difficulty(difficulty);
        if let Some(preferences) = preferences {
            request = request.with_preferences(preferences);
        }
        self.compose_recipe(request).await
    }

    /// First recipe for the confirmed list.
    async fn compose(&self, chat_id: i64, mut session: Session) -> Session {
        if session.ingredients.is_empty() {
            self.reply(
                chat_id,
                texts::ADD_SOMETHING_FIRST,
                Some(menu(ConversationState::Confirming)),
            )
            .await;
            return session;
        }

        self.reply(chat_id, texts::THINKING, None).await;
        let preferences = self.load_preferences(chat_id).await;

        match self
            .generate(session.ingredients.clone(), preferences, None)
            .await
        {
            RecipeOutcome::Composed(recipe) => {
                info!(chat_id, from = ?session.state, to = ?ConversationState::AfterRecipe, "state transition");
                session.state = ConversationState::AfterRecipe;
                session.last_recipe = Some(recipe.clone());
                session.temp_difficulty = None;
                self.persist(chat_id, &session).await;
                self.reply(chat_id, &recipe, Some(menu(ConversationState::AfterRecipe)))
                    .await;
            }
            failed => {
                warn!(chat_id, outcome = ?failed, "recipe not composed");
                self.reply(
                    chat_id,
                    failed.text(),
                    Some(menu(ConversationState::Confirming)),
                )
                .await;
            }
        }
        session
    }

    /// Another recipe for the same list, staying in AFTER_RECIPE.
    async fn recompose(
        &self,
        chat_id: i64,
        mut session: Session,
        preferences: Option<UserPreferences>,
        notice: &str,
    ) -> Session {
        self.reply(chat_id, notice, None).await;

        match self
            .generate(
                session.ingredients.clone(),
                preferences,
                session.temp_difficulty,
            )
            .await
        {
            RecipeOutcome::Composed(recipe) => {
                session.last_recipe = Some(recipe.clone());
                self.persist(chat_id, &session).await;
                self.reply(chat_id, &recipe, Some(menu(ConversationState::AfterRecipe)))
                    .await;
            }
            failed => {
                warn!(chat_id, outcome = ?failed, "recipe not recomposed");
                self.reply(
                    chat_id,
                    failed.text(),
                    Some(menu(ConversationState::AfterRecipe)),
                )
                .await;
            }
        }
        session
    }

    async fn save_recipe(&self, chat_id: i64, session: &Session) {
        let keyboard = Some(menu(ConversationState::AfterRecipe));

        let Some(recipe) = session.last_recipe.clone() else {
            self.reply(chat_id, texts::NOTHING_TO_SAVE, keyboard).await;
            return;
        };

        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(notice) => {
                self.reply(chat_id, notice, keyboard).await;
                return;
            }
        };

        let notice = match self
            .history_repository
            .append(
                user.id,
                RecipeHistoryEntry::join_ingredients(&session.ingredients),
                recipe,
            )
            .await
        {
            Ok(entry) => {
                info!(chat_id, entry_id = entry.id, "recipe saved");
                texts::RECIPE_SAVED
            }
            Err(e) => {
                error!(chat_id, "Failed to save recipe: {}", e);
                texts::SOMETHING_WENT_WRONG
            }
        };
        self.reply(chat_id, notice, keyboard).await;
    }

    async fn list_saved_recipes(&self, chat_id: i64) {
        let keyboard = Some(menu(ConversationState::Main));

        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(notice) => {
                self.reply(chat_id, notice, keyboard).await;
                return;
            }
        };

        match self
            .history_repository
            .list_recent(user.id, HISTORY_PAGE_SIZE)
            .await
        {
            Ok(entries) if entries.is_empty() => {
                self.reply(chat_id, texts::NO_SAVED_RECIPES, keyboard).await;
            }
            Ok(entries) => {
                let rows = entries
                    .iter()
                    .map(|entry| {
                        vec![InlineButton::new(
                            entry.list_label(),
                            CallbackAction::ShowRecipe(entry.id).data(),
                        )]
                    })
                    .collect();
                self.reply(
                    chat_id,
                    texts::SAVED_RECIPES_HEADER,
                    Some(Keyboard::Inline(rows)),
                )
                .await;
            }
            Err(e) => {
                error!(chat_id, "Failed to list saved recipes: {}", e);
                self.reply(chat_id, texts::SOMETHING_WENT_WRONG, keyboard)
                    .await;
            }
        }
    }

    async fn send_settings_panel(&self, chat_id: i64) {
        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(notice) => {
                self.reply(chat_id, notice, Some(menu(ConversationState::Settings)))
                    .await;
                return;
            }
        };

        match self.preferences_repository.get_or_create(user.id).await {
            Ok(preferences) => {
                self.reply(
                    chat_id,
                    &settings_text(&preferences),
                    Some(settings_keyboard(&preferences)),
                )
                .await;
            }
            Err(e) => {
                error!(chat_id, "Failed to load preferences: {}", e);
                self.reply(
                    chat_id,
                    texts::SOMETHING_WENT_WRONG,
                    Some(menu(ConversationState::Settings)),
                )
                .await;
            }
        }
    }

    /// Difficulty typed while in SETTINGS.
    async fn set_difficulty(&self, chat_id: i64, difficulty: Difficulty) {
        let keyboard = Some(menu(ConversationState::Settings));

        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(notice) => {
                self.reply(chat_id, notice, keyboard).await;
                return;
            }
        };

        match self
            .preferences_repository
            .update(user.id, PreferenceUpdate::Difficulty(difficulty))
            .await
        {
            Ok(preferences) => {
                info!(chat_id, difficulty = ?difficulty, "difficulty preference stored");
                self.reply(chat_id, &texts::difficulty_set(difficulty.label()), keyboard)
                    .await;
                self.reply(
                    chat_id,
                    &settings_text(&preferences),
                    Some(settings_keyboard(&preferences)),
                )
                .await;
            }
            Err(e) => {
                error!(chat_id, "Failed to store difficulty: {}", e);
                self.reply(chat_id, texts::SOMETHING_WENT_WRONG, keyboard)
                    .await;
            }
        }
    }

    /// Stores a change made from the settings panel, confirms it in place and sends a
    /// fresh panel.
    async fn apply_preference(
        &self,
        query: &CallbackQuery,
        user_id: i64,
        update: PreferenceUpdate,
        notice: &str,
    ) {
        match self.preferences_repository.update(user_id, update).await {
            Ok(preferences) => {
                info!(chat_id = query.chat_id, update = ?update, "preference updated");
                self.edit(query.chat_id, query.message_id, notice, None)
                    .await;
                self.reply(
                    query.chat_id,
                    &settings_text(&preferences),
                    Some(settings_keyboard(&preferences)),
                )
                .await;
            }
            Err(e) => {
                error!(chat_id = query.chat_id, "Failed to update preference: {}", e);
                self.edit(
                    query.chat_id,
                    query.message_id,
                    texts::SOMETHING_WENT_WRONG,
                    None,
                )
                .await;
            }
        }
    }

    async fn run_step(&self, message: &InboundMessage, session: Session, step: Step) -> Session {
        let chat_id = message.chat_id;

        match step {
            Step::Recover => {
                let session = Session::default();
                self.persist(chat_id, &session).await;
                self.reply(chat_id, texts::MAIN_MENU, Some(menu(ConversationState::Main)))
                    .await;
                session
            }
            Step::Welcome => {
                self.register(message).await;
                self.reply(chat_id, texts::WELCOME_TEXT, Some(menu(ConversationState::Main)))
                    .await;
                session
            }
            Step::ShowHelp => {
                self.reply(chat_id, texts::HELP_TEXT, Some(menu(ConversationState::Main)))
                    .await;
                session
            }
            Step::MoveTo { state, notice } => {
                let session = self.move_to(chat_id, session, state).await;
                self.reply(chat_id, notice, Some(menu(state))).await;
                session
            }
            Step::OpenSettings => {
                let session = self
                    .move_to(chat_id, session, ConversationState::Settings)
                    .await;
                self.reply(
                    chat_id,
                    texts::SETTINGS_INTRO,
                    Some(menu(ConversationState::Settings)),
                )
                .await;
                self.send_settings_panel(chat_id).await;
                session
            }
            Step::ListSavedRecipes => {
                self.list_saved_recipes(chat_id).await;
                session
            }
            Step::Extract(source) => self.extract(chat_id, session, source).await,
            Step::AddIngredient(name) => {
                let session = self
                    .edit_ingredients(chat_id, session, IngredientEdit::Add(vec![name]))
                    .await;
                self.show_list(chat_id, &session, texts::INGREDIENT_ADDED)
                    .await;
                session
            }
            Step::RemoveIngredient(name) => {
                let existing = session.find_ingredient(&name).cloned();
                self.remove_ingredient(chat_id, session, &name, existing)
                    .await
            }
            Step::ShowList => {
                let session = self
                    .move_to(chat_id, session, ConversationState::Confirming)
                    .await;
                self.show_list(chat_id, &session, texts::CURRENT_LIST).await;
                session
            }
            Step::Compose => self.compose(chat_id, session).await,
            Step::Reset { notice } => {
                info!(chat_id, from = ?session.state, "session reset");
                if let Err(e) = self.session_repository.delete(chat_id).await {
                    error!(chat_id, "Failed to reset session: {}", e);
                }
                self.reply(chat_id, notice, Some(menu(ConversationState::Main)))
                    .await;
                Session::default()
            }
            Step::SaveRecipe => {
                self.save_recipe(chat_id, &session).await;
                session
            }
            Step::Recompose => {
                let preferences = self.load_preferences(chat_id).await;
                self.recompose(chat_id, session, preferences, texts::THINKING)
                    .await
            }
            Step::ShiftDifficulty(shift) => {
                let preferences = self.load_preferences(chat_id).await;
                let difficulty = Difficulty::next(
                    session.temp_difficulty,
                    preferences.as_ref().map(|p| p.difficulty),
                    shift,
                );
                info!(chat_id, from = ?session.temp_difficulty, to = ?difficulty, "difficulty shifted");

                let mut session = session;
                session.temp_difficulty = Some(difficulty);
                self.persist(chat_id, &session).await;

                let notice = texts::thinking_with_difficulty(difficulty.label());
                self.recompose(chat_id, session, preferences, &notice).await
            }
            Step::SetDifficulty(difficulty) => {
                self.set_difficulty(chat_id, difficulty).await;
                session
            }
            Step::ShowDifficultyOptions => {
                self.reply(chat_id, texts::CHOOSE_DIFFICULTY, Some(difficulty_menu()))
                    .await;
                session
            }
            Step::Reprompt => {
                self.reply(chat_id, texts::CHOOSE_FROM_MENU, Some(menu(session.state)))
                    .await;
                session
            }
        }
    }
}

impl<U, P, H, S, LLM, T> ConversationService for Service<U, P, H, S, LLM, T>
where
    U: UserRepository,
    P: PreferencesRepository,
    H: RecipeHistoryRepository,
    S: SessionRepository,
    LLM: LLMClient,
    T: ChatTransport,
{
    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    async fn handle_message(&self, message: InboundMessage) -> Session {
        let session = self.load_session(&message).await;
        let step = plan(session.state, &message.content);
        info!(state = ?session.state, step = ?step, "handling message");

        self.run_step(&message, session, step).await
    }

    #[instrument(skip(self, query), fields(chat_id = query.chat_id, data = %query.data))]
    async fn handle_callback(&self, query: CallbackQuery) {
        self.dismiss_callback(query.callback_id.clone()).await;

        let Some(action) = CallbackAction::parse(&query.data) else {
            warn!("unknown callback data");
            return;
        };
        info!(action = ?action, "handling callback");

        let chat_id = query.chat_id;
        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(notice) => {
                match action {
                    CallbackAction::ShowRecipe(_) => self.reply(chat_id, notice, None).await,
                    _ => self.edit(chat_id, query.message_id, notice, None).await,
                }
                return;
            }
        };

        match action {
            CallbackAction::ShowRecipe(entry_id) => {
                let text = match self.history_repository.get_by_id(user.id, entry_id).await {
                    Ok(Some(entry)) => format!("{}\n\n{}", texts::FULL_RECIPE_HEADER, entry.recipe),
                    Ok(None) => texts::RECIPE_NOT_FOUND.to_string(),
                    Err(e) => {
                        error!("Failed to load saved recipe: {}", e);
                        texts::SOMETHING_WENT_WRONG.to_string()
                    }
                };
                self.reply(chat_id, &text, None).await;
            }
            CallbackAction::ToggleHealthyProfile => {
                let current = match self.preferences_repository.get_or_create(user.id).await {
                    Ok(preferences) => preferences,
                    Err(e) => {
                        error!("Failed to load preferences: {}", e);
                        self.edit(chat_id, query.message_id, texts::SOMETHING_WENT_WRONG, None)
                            .await;
                        return;
                    }
                };
                let enabled = !current.healthy_profile;
                let notice = if enabled {
                    texts::HEALTHY_ON
                } else {
                    texts::HEALTHY_OFF
                };
                self.apply_preference(&query, user.id, PreferenceUpdate::HealthyProfile(enabled), notice)
                    .await;
            }
            CallbackAction::ChooseCuisine => {
                self.edit(
                    chat_id,
                    query.message_id,
                    texts::CHOOSE_CUISINE,
                    Some(cuisine_options_keyboard()),
                )
                .await;
            }
            CallbackAction::SetCuisine(cuisine) => {
                self.apply_preference(
                    &query,
                    user.id,
                    PreferenceUpdate::PreferredCuisine(cuisine),
                    &texts::cuisine_set(cuisine.label()),
                )
                .await;
            }
            CallbackAction::ChooseDifficulty => {
                self.edit(
                    chat_id,
                    query.message_id,
                    texts::CHOOSE_DIFFICULTY,
                    Some(difficulty_options_keyboard()),
                )
                .await;
            }
            CallbackAction::SetDifficulty(difficulty) => {
                self.apply_preference(
                    &query,
                    user.id,
                    PreferenceUpdate::Difficulty(difficulty),
                    &texts::difficulty_set(difficulty.label()),
                )
                .await;
            }
        }
    }

    async fn dismiss_callback(&self, callback_id: String) {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            error!("Failed to answer callback: {}", e);
        }
    }
}
