use bookrec::{Format, Recency};

use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use eyre::{eyre, Context, Result};

/// The answers given to the recommendation form.
#[derive(Debug)]
pub struct Form {
    pub topics: String,
    pub recency: Recency,
    pub formats: Vec<Format>,
}

pub fn user_select<S: ToString>(prompt: &str, items: &[S], default: usize) -> Result<usize> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_multi_select<S: ToString>(prompt: &str, items: &[(S, bool)]) -> Result<Vec<usize>> {
    MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items_checked(items)
        .interact()
        .wrap_err_with(|| eyre!("User selection cancelled"))
}

pub fn user_input(prompt: &str, default: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme);
    input.with_prompt(prompt);
    if let Some(default) = default {
        input.default(default);
    }

    input
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

/// Asks for the topics, recency and formats, prefilled with any values already known.
pub fn recommendation_form(
    topics: Option<String>,
    recency: Recency,
    formats: &[Format],
) -> Result<Form> {
    let topics = user_input(
        "What topics are you interested in? (e.g. AI, history, fiction)",
        topics,
    )?;

    let default = Recency::ALL
        .iter()
        .position(|r| *r == recency)
        .unwrap_or_default();
    let recency = Recency::ALL[user_select("Recency preference", &Recency::ALL[..], default)?];

    let items = Format::ALL
        .iter()
        .map(|f| (f.to_string(), formats.contains(f)))
        .collect::<Vec<_>>();
    let formats = user_multi_select("Preferred formats", &items)?
        .into_iter()
        .map(|i| Format::ALL[i])
        .collect();

    Ok(Form {
        topics,
        recency,
        formats,
    })
}
