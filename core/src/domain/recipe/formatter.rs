use std::sync::LazyLock;

use regex::Regex;

pub const CLOSING_LINE: &str = "Enjoy your meal!";

/// Rendered when the model gave no usable nutrition figures.
pub const PLACEHOLDER_NUTRITION: &str = "Per 100g: ~150 kcal, protein 5 g, fat 5 g, carbs 20 g\n\
Per serving: ~350 kcal, protein 12 g, fat 12 g, carbs 45 g";

const CLOSING_PHRASES: [&str; 3] = ["enjoy your meal", "bon appetit", "bon appétit"];

/// Section names recognised as headers, with or without a trailing colon.
const KNOWN_HEADERS: &[&str] = &[
    "ingredients",
    "ingredient list",
    "preparation",
    "prep",
    "steps",
    "cooking steps",
    "cooking instructions",
    "instructions",
    "method",
    "directions",
    "cooking",
    "tips",
    "tip",
    "advice",
    "recommendations",
    "tips and recommendations",
    "nutrition",
    "nutrition facts",
    "nutritional value",
];

/// Colon headers that may carry a qualifier, as in "Calories per serving: ...".
const NUTRITION_PREFIXES: [&str; 2] = ["nutrition", "calorie"];

const HEADER_MAX_WORDS: usize = 4;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid formatter regex")
}

static PARENTHESISED: LazyLock<Regex> = LazyLock::new(|| regex(r"\([^)]*\)"));
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r"<[^>]+>"));
static HEADING_MARK: LazyLock<Regex> = LazyLock::new(|| regex(r"^#+\s*"));
static STAR_BULLET: LazyLock<Regex> = LazyLock::new(|| regex(r"^[*•]\s+"));
static ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)^(?:[-–—•·▫️🔸]+|(?:step\s*)?\d+\s*[.):])\s*"));
static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)^(?:recipe|title|dish)\s*:\s*"));
static DIFFICULTY_LINE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)^difficulty(?:\s+level)?\s*[:\-–]\s*(.+)$"));
static NUTRITION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)per\s*100\s*g|per\s+(?:serving|portion)"));

const NUMBER: &str = r"(\d+(?:[.,]\d+)?)";

static KCAL: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        regex(&format!(r"(?i){NUMBER}\s*(?:kcal|calories|cal)\b")),
        regex(&format!(r"(?i)calories?\s*[:\-–=]?\s*~?\s*{NUMBER}")),
    ]
});
static PROTEIN: LazyLock<[Regex; 2]> = LazyLock::new(|| nutrient_patterns("proteins?"));
static FAT: LazyLock<[Regex; 2]> = LazyLock::new(|| nutrient_patterns("fats?"));
static CARBS: LazyLock<[Regex; 2]> = LazyLock::new(|| nutrient_patterns(r"carb\w*"));

fn nutrient_patterns(name: &str) -> [Regex; 2] {
    [
        regex(&format!(r"(?i)\b{name}\s*[:\-–=]?\s*~?\s*{NUMBER}")),
        regex(&format!(r"(?i){NUMBER}\s*g\s*(?:of\s+)?{name}\b")),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Intro,
    Ingredients,
    Prep,
    Steps,
    Tips,
    Nutrition,
}

impl Section {
    /// Keyword lookup, most specific first.
    fn from_keyword(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("prep") {
            Some(Section::Prep)
        } else if text.contains("nutrition") || text.contains("calorie") {
            Some(Section::Nutrition)
        } else if text.contains("tip") || text.contains("advice") || text.contains("recommendation")
        {
            Some(Section::Tips)
        } else if ["step", "instruction", "method", "direction", "cooking"]
            .iter()
            .any(|k| text.contains(k))
        {
            Some(Section::Steps)
        } else if text.contains("ingredient") {
            Some(Section::Ingredients)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Sections {
    title: Option<String>,
    difficulty: Option<String>,
    intro: Vec<String>,
    ingredients: Vec<String>,
    prep: Vec<String>,
    steps: Vec<String>,
    tips: Vec<String>,
    nutrition: Vec<String>,
    closing: Option<String>,
}

impl Sections {
    fn push(&mut self, section: Section, line: String) {
        match section {
            Section::Intro => self.intro.push(line),
            Section::Ingredients => self.ingredients.push(line),
            Section::Prep => self.prep.push(line),
            Section::Steps => self.steps.push(line),
            Section::Tips => self.tips.push(line),
            Section::Nutrition => self.nutrition.push(line),
        }
    }
}

fn strip_markup(line: &str) -> String {
    let line = line.trim();
    let line = HEADING_MARK.replace(line, "");
    let line = STAR_BULLET.replace(&line, "- ");
    let line = HTML_TAG.replace_all(&line, "");
    line.replace("**", "")
        .replace("__", "")
        .replace(['*', '`'], "")
        .replace('•', "-")
        .trim()
        .to_string()
}

fn starts_with_marker(line: &str) -> bool {
    ITEM_MARKER.is_match(line)
}

fn strip_marker(line: &str) -> String {
    ITEM_MARKER.replace(line, "").trim().to_string()
}

/// Lowercased header text without qualifiers in parentheses or trailing punctuation.
fn header_name(text: &str) -> String {
    PARENTHESISED
        .replace_all(text, "")
        .trim()
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn is_known_header(name: &str) -> bool {
    KNOWN_HEADERS.contains(&name)
}

/// Returns the section a header line opens and any content written after its colon.
/// Lines such as "Cooking time: 25 minutes" are not headers.
fn detect_header(line: &str) -> Option<(Section, Option<String>)> {
    if starts_with_marker(line) {
        return None;
    }

    if let Some((head, rest)) = line.split_once(':') {
        if head.split_whitespace().count() > HEADER_MAX_WORDS {
            return None;
        }
        let name = header_name(head);
        let recognised = is_known_header(&name)
            || NUTRITION_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix));
        if !recognised {
            return None;
        }
        let section = Section::from_keyword(&name)?;
        let rest = rest.trim();
        let rest = (!rest.is_empty()).then(|| rest.to_string());
        return Some((section, rest));
    }

    let name = header_name(line);
    if is_known_header(&name) {
        return Section::from_keyword(&name).map(|section| (section, None));
    }
    None
}

fn is_closing(line: &str) -> bool {
    let lowered = line.to_lowercase();
    CLOSING_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

fn split_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current = Section::Intro;
    let mut seen_content = false;

    for raw in text.lines() {
        let line = strip_markup(raw);
        if line.is_empty() {
            continue;
        }

        let first_line = !seen_content;
        seen_content = true;

        if let Some(captures) = DIFFICULTY_LINE.captures(&line) {
            sections.difficulty = Some(captures[1].trim().to_string());
            continue;
        }

        if is_closing(&line) {
            sections.closing = Some(line);
            continue;
        }

        if first_line && !line.ends_with(':') {
            let title = TITLE_PREFIX.replace(&line, "").trim().to_string();
            if !title.is_empty() {
                sections.title = Some(title);
            }
            continue;
        }

        if let Some((section, rest)) = detect_header(&line) {
            current = section;
            match rest {
                // "Calories per serving: ..." keeps its block marker for the figure parser.
                Some(_) if section == Section::Nutrition => sections.push(current, line),
                Some(rest) => sections.push(current, rest),
                None => {}
            }
            continue;
        }

        sections.push(current, line);
    }

    sections
}

#[derive(Debug, Default, PartialEq, Eq)]
struct NutritionFigures {
    kcal: Option<String>,
    protein: Option<String>,
    fat: Option<String>,
    carbs: Option<String>,
}

impl NutritionFigures {
    fn parse(block: &str) -> Self {
        let find = |patterns: &[Regex; 2]| {
            patterns
                .iter()
                .find_map(|re| re.captures(block))
                .map(|captures| captures[1].replace(',', "."))
        };
        Self {
            kcal: find(&KCAL),
            protein: find(&PROTEIN),
            fat: find(&FAT),
            carbs: find(&CARBS),
        }
    }

    fn is_empty(&self) -> bool {
        self.kcal.is_none() && self.protein.is_none() && self.fat.is_none() && self.carbs.is_none()
    }

    fn render(&self, label: &str) -> String {
        let mut parts = Vec::new();
        if let Some(kcal) = &self.kcal {
            parts.push(format!("{} kcal", kcal));
        }
        for (name, value) in [
            ("protein", &self.protein),
            ("fat", &self.fat),
            ("carbs", &self.carbs),
        ] {
            if let Some(value) = value {
                parts.push(format!("{} {} g", name, value));
            }
        }
        format!("{}: {}", label, parts.join(", "))
    }
}

/// Pulls the "per 100g" and "per serving" figures out of free text. Falls back to the
/// placeholder estimate when neither block parses.
fn render_nutrition(source: &str) -> String {
    let starts: Vec<(usize, bool)> = NUTRITION_BLOCK
        .find_iter(source)
        .map(|m| (m.start(), m.as_str().contains("100")))
        .collect();

    let mut per_100g: Option<NutritionFigures> = None;
    let mut per_serving: Option<NutritionFigures> = None;

    for (index, (start, is_100g)) in starts.iter().enumerate() {
        let end = starts
            .get(index + 1)
            .map(|(next, _)| *next)
            .unwrap_or(source.len());
        let figures = NutritionFigures::parse(&source[*start..end]);
        if figures.is_empty() {
            continue;
        }
        let slot = if *is_100g {
            &mut per_100g
        } else {
            &mut per_serving
        };
        slot.get_or_insert(figures);
    }

    let lines: Vec<String> = [
        per_100g.map(|f| f.render("Per 100g")),
        per_serving.map(|f| f.render("Per serving")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if lines.is_empty() {
        PLACEHOLDER_NUTRITION.to_string()
    } else {
        lines.join("\n")
    }
}

fn bullet_block(header: &str, items: &[String]) -> Option<String> {
    let items: Vec<String> = items
        .iter()
        .map(|item| strip_marker(item))
        .filter(|item| !item.is_empty())
        .map(|item| format!("- {}", item))
        .collect();
    (!items.is_empty()).then(|| format!("{}:\n{}", header, items.join("\n")))
}

fn numbered_block(header: &str, items: &[String]) -> Option<String> {
    let items: Vec<String> = items
        .iter()
        .map(|item| strip_marker(item))
        .filter(|item| !item.is_empty())
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, item))
        .collect();
    (!items.is_empty()).then(|| format!("{}:\n{}", header, items.join("\n")))
}

/// Normalises a model answer into the fixed recipe layout: title, difficulty,
/// ingredients, preparation, steps, tips, nutrition, closing line. Missing sections are
/// left out, except nutrition which always renders.
pub fn format_recipe(text: &str) -> String {
    let sections = split_sections(text);

    let mut head: Vec<String> = Vec::new();
    if let Some(title) = &sections.title {
        head.push(title.clone());
    }
    if let Some(difficulty) = &sections.difficulty {
        head.push(format!("Difficulty: {}", difficulty));
    }
    head.extend(sections.intro.iter().cloned());

    let nutrition_source = if sections.nutrition.is_empty() {
        text.to_string()
    } else {
        sections.nutrition.join("\n")
    };

    let blocks: Vec<String> = [
        (!head.is_empty()).then(|| head.join("\n")),
        bullet_block("Ingredients", &sections.ingredients),
        bullet_block("Preparation", &sections.prep),
        numbered_block("Steps", &sections.steps),
        bullet_block("Tips", &sections.tips),
        Some(format!(
            "Nutrition (approximate):\n{}",
            render_nutrition(&nutrition_source)
        )),
        Some(
            sections
                .closing
                .clone()
                .unwrap_or_else(|| CLOSING_LINE.to_string()),
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_answer_is_normalised() {
        let answer = "**Apple Oat Crumble**\n\
Difficulty: Easy\n\
\n\
## Ingredients:\n\
* apple\n\
* oats\n\
Preparation:\n\
- Wash and slice the apple.\n\
Steps:\n\
3. Mix everything.\n\
7) Bake for 20 minutes.\n\
Tips:\n\
• Serve warm.\n\
Nutrition:\n\
Per 100g: 120 kcal, protein 3 g, fat 4 g, carbs 19 g\n\
Per serving: 300 kcal, protein 7 g, fat 10 g, carbs 48 g\n";

        let expected = "Apple Oat Crumble\n\
Difficulty: Easy\n\
\n\
Ingredients:\n\
- apple\n\
- oats\n\
\n\
Preparation:\n\
- Wash and slice the apple.\n\
\n\
Steps:\n\
1. Mix everything.\n\
2. Bake for 20 minutes.\n\
\n\
Tips:\n\
- Serve warm.\n\
\n\
Nutrition (approximate):\n\
Per 100g: 120 kcal, protein 3 g, fat 4 g, carbs 19 g\n\
Per serving: 300 kcal, protein 7 g, fat 10 g, carbs 48 g\n\
\n\
Enjoy your meal!";

        assert_eq!(format_recipe(answer), expected);
    }

    #[test]
    fn test_missing_nutrition_renders_placeholder() {
        let formatted = format_recipe("Omelette\nIngredients:\n- egg\nSteps:\n1. Beat the egg.\n2. Fry it.");

        assert!(formatted.contains(&format!(
            "Nutrition (approximate):\n{}",
            PLACEHOLDER_NUTRITION
        )));
        assert!(!formatted.contains("Tips:"));
        assert!(!formatted.contains("Preparation:"));
    }

    #[test]
    fn test_existing_closing_is_not_duplicated() {
        let formatted = format_recipe("Soup\nSteps:\n1. Boil water.\nBon appetit!");

        assert!(formatted.ends_with("Bon appetit!"));
        assert!(!formatted.contains(CLOSING_LINE));
    }

    #[test]
    fn test_markup_and_html_are_stripped() {
        let formatted =
            format_recipe("Recipe: <b>Green Salad</b>\n### Ingredients\n- __cucumber__\n- `dill`");

        assert!(formatted.starts_with("Green Salad\n\nIngredients:\n- cucumber\n- dill"));
        assert!(!formatted.contains('<'));
        assert!(!formatted.contains('`'));
    }

    #[test]
    fn test_nutrition_is_found_without_a_header() {
        let formatted = format_recipe(
            "Toast\nSteps:\n1. Toast the bread.\nCalories per serving: 210 kcal, 6 g protein, 3 g fat, 38 g carbs",
        );

        assert!(formatted.contains("Per serving: 210 kcal, protein 6 g, fat 3 g, carbs 38 g"));
        assert!(!formatted.contains("Per 100g"));
    }

    #[test]
    fn test_timing_lines_stay_in_the_intro() {
        let answer = "Apple Crumble\n\
Difficulty: Easy\n\
Preparation time: 10 minutes\n\
Cooking time: 25 minutes\n\
Ingredients:\n\
- apple\n\
Steps:\n\
1. Mix.\n\
2. Bake.";

        let formatted = format_recipe(answer);

        assert!(formatted.starts_with(
            "Apple Crumble\n\
Difficulty: Easy\n\
Preparation time: 10 minutes\n\
Cooking time: 25 minutes\n\
\n\
Ingredients:\n\
- apple\n\
\n\
Steps:\n\
1. Mix.\n\
2. Bake."
        ));
        assert!(!formatted.contains("Preparation:"));
    }

    #[test]
    fn test_qualified_headers_are_recognised() {
        let formatted = format_recipe(
            "Pancakes\nIngredients (for 2 servings):\n- flour\nCooking instructions:\n1. Whisk.\n2. Fry.",
        );

        assert!(formatted.contains("Ingredients:\n- flour"));
        assert!(formatted.contains("Steps:\n1. Whisk.\n2. Fry."));
    }

    #[test]
    fn test_empty_answer_still_renders_required_blocks() {
        let formatted = format_recipe("");
        assert_eq!(
            formatted,
            format!(
                "Nutrition (approximate):\n{}\n\n{}",
                PLACEHOLDER_NUTRITION, CLOSING_LINE
            )
        );
    }
}
