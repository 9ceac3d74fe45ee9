use std::future::Future;

/// Ingredient Extractor: turns a photo or a text message into a deduplicated list of
/// ingredient names. Failures come back as an empty list.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientService: Send + Sync {
    fn extract_from_text(&self, text: &str) -> Vec<String>;

    fn extract_from_image(&self, image_data: Vec<u8>) -> impl Future<Output = Vec<String>> + Send;
}
