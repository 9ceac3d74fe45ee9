/// Fixed instruction sent with every photo.
pub const VISION_PROMPT: &str = "The image shows food. List the ingredients you can see, separated by commas. \
Include only products that can be cooked with in the form they appear in the photo. \
Do not include live animals, people, inedible objects, packaging, or plants unless they are ready-to-eat food. \
If the photo shows only a live animal, a person, or inedible objects, answer strictly: No ingredients. \
Examples: a live rooster is not 'chicken'; an apple is 'apple'; a person means: No ingredients.";

/// Answers meaning "nothing edible here". Matched as case-insensitive substrings.
pub const NO_INGREDIENTS_PHRASES: [&str; 4] = [
    "no ingredients",
    "ingredients not found",
    "no food items",
    "nothing edible",
];
