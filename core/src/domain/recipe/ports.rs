use std::future::Future;

use crate::domain::recipe::value_objects::{RecipeOutcome, RecipeRequest};

/// Recipe Composer.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    fn compose_recipe(
        &self,
        request: RecipeRequest,
    ) -> impl Future<Output = RecipeOutcome> + Send;
}
