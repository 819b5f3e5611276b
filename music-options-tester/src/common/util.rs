use anyhow::{Context, Result};
use music_options::Category;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Categories named in a comma-separated list; `all` or an empty list
/// selects every category.
pub fn parse_categories(arg: &str) -> Result<Vec<Category>> {
    let tokens = split_csv(arg);
    if tokens.is_empty() || tokens.iter().any(|t| t == "all") {
        return Ok(Category::ALL.to_vec());
    }

    let mut categories = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let category: Category = token
            .parse()
            .with_context(|| format!("invalid --categories value `{arg}`"))?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(categories)
}
