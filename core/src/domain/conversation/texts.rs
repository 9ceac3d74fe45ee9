// Menu labels
pub const BTN_START_COOKING: &str = "🍳 Start cooking";
pub const BTN_SETTINGS: &str = "⚙️ Settings";
pub const BTN_SAVED_RECIPES: &str = "📚 Saved recipes";
pub const BTN_HELP: &str = "❓ Help";
pub const BTN_BACK: &str = "🔁 Back to menu";
pub const BTN_BACK_TO_LIST: &str = "↩️ Back to list";
pub const BTN_CONFIRM: &str = "✅ Looks right, let's cook!";
pub const BTN_ADD: &str = "➕ Add ingredient";
pub const BTN_REMOVE: &str = "➖ Remove ingredient";
pub const BTN_CANCEL: &str = "🛑 Changed my mind";
pub const BTN_SAVE_RECIPE: &str = "💾 Save recipe";
pub const BTN_ANOTHER_RECIPE: &str = "🔄 Another recipe";
pub const BTN_EASIER: &str = "⬇️ Easier";
pub const BTN_HARDER: &str = "⬆️ Harder";
pub const BTN_FINISH: &str = "🛑 Finish cooking";
pub const BTN_DIFFICULTY: &str = "🎚️ Difficulty";

pub const WELCOME_TEXT: &str = "Hi! I'm SnapChef 👨‍🍳\n\
Send me a photo of your fridge or a list of products and I will suggest a recipe.\n\
Press \"Start cooking\" to begin.";

pub const HELP_TEXT: &str = "How it works:\n\
1. Press \"Start cooking\".\n\
2. Send a photo of your products or list them separated by commas.\n\
3. Check the list, add or remove items, then confirm.\n\
4. Get a recipe, save it, or ask for an easier or harder one.\n\n\
Settings let you enable healthy mode and pick a cuisine and difficulty.";

pub const MAIN_MENU: &str = "You are in the main menu. Choose an action:";
pub const BACK_TO_MENU: &str = "You are back in the main menu.";
pub const ASK_INGREDIENTS: &str = "Send a photo or a text list of ingredients.";
pub const PHOTO_RECEIVED: &str = "📷 Photo received! Let me take a look…";
pub const NOTHING_RECOGNISED: &str = "❌ Hmm, I can't see anything edible. Try another photo or list.";
pub const RECOGNISED_HEADER: &str = "Recognised ingredients:";
pub const CURRENT_LIST: &str = "Current ingredients:";
pub const EMPTY_LIST: &str = "(the list is empty)";
pub const CONFIRM_QUESTION: &str = "Is everything right? Choose an action:";
pub const ASK_ADD: &str = "Send an ingredient to add…";
pub const ASK_REMOVE: &str = "Send an ingredient to remove…";
pub const INGREDIENT_ADDED: &str = "Ingredient added.";
pub const ADD_SOMETHING_FIRST: &str = "The list is empty. Add at least one ingredient first.";
pub const THINKING: &str = "👨‍🍳 Thinking… Let's come up with something tasty!";
pub const COOKING_CANCELLED: &str = "Cooking cancelled. You are in the main menu.";
pub const COOKING_FINISHED: &str = "Cooking finished. You are in the main menu.";
pub const RECIPE_SAVED: &str = "✅ Recipe saved to your favourites.";
pub const NOTHING_TO_SAVE: &str = "There is no recipe to save yet.";
pub const SOMETHING_WENT_WRONG: &str = "⚠️ Something went wrong. Please try again.";
pub const CHOOSE_FROM_MENU: &str = "Please choose an option from the menu below or send your products. 👇";
pub const USER_NOT_FOUND: &str = "User not found. Send /start to register.";

pub const SETTINGS_INTRO: &str = "Profile settings. Choose what you want to change:";
pub const CHOOSE_DIFFICULTY: &str = "Choose a difficulty:";
pub const CHOOSE_CUISINE: &str = "Choose a cuisine:";
pub const HEALTHY_ON: &str = "Healthy eating mode enabled.";
pub const HEALTHY_OFF: &str = "Healthy eating mode disabled.";

pub const SAVED_RECIPES_HEADER: &str = "Your saved recipes:";
pub const NO_SAVED_RECIPES: &str = "You have no saved recipes yet.";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found.";
pub const FULL_RECIPE_HEADER: &str = "Full recipe:";

pub fn ingredient_removed(name: &str) -> String {
    format!("Ingredient '{}' removed.", name)
}

pub fn ingredient_not_found(name: &str) -> String {
    format!("Ingredient '{}' is not in the list.", name)
}

pub fn difficulty_set(label: &str) -> String {
    format!("Difficulty set: {}.", label)
}

pub fn cuisine_set(label: &str) -> String {
    format!("Cuisine set: {}.", label)
}

pub fn thinking_with_difficulty(label: &str) -> String {
    format!("{} (difficulty: {})", THINKING, label)
}
