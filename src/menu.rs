use colored::Colorize;
use inquire::Select;

use ghfaves::{error::AppError, profile::ProfileSummary, render::TableRenderer, validation::{prompt_until_valid, validate_input_username}};

use crate::{add_favorite, delete_favorite, list_favorites, show_favorite, Store};

/// Menu entry for returning to the previous menu
const BACK_OPTION: &str = "<back>";

/// Runs interactive menu interface
pub async fn run_menu(store: &mut Store, renderer: &mut TableRenderer) -> Result<(), AppError> {
    list_favorites(store, renderer)?;

    loop {
        let actions: Vec<&'static str> = vec![
            "add favorite",
            "remove favorite",
            "show favorite",
            "list favorites",
            "quit"
        ];

        let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
            .prompt()?;

        let outcome: Result<(), AppError> = match action_selected {
            "add favorite" => menu_add_favorite(store, renderer).await,
            "remove favorite" => menu_remove_favorite(store, renderer),
            "show favorite" => menu_show_favorite(store),
            "list favorites" => list_favorites(store, renderer),
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            },
            _ => unreachable!("unexpected input"),
        };
        report(outcome)?;
    }
}

/// Prints failures that only abort the current action
fn report(outcome: Result<(), AppError>) -> Result<(), AppError> {
    match outcome {
        Err(err @ (AppError::AlreadyExists(_) | AppError::NotFound(_) | AppError::Validation(_))) => {
            println!("{}", err.to_string().red());
            Ok(())
        }
        other => other,
    }
}

/// Menu for adding a favorite
async fn menu_add_favorite(store: &mut Store, renderer: &mut TableRenderer) -> Result<(), AppError> {
    let username: String = prompt_until_valid(
        &format!("{}", "enter github username:".blue()),
        validate_input_username,
    )?;

    add_favorite(store, renderer, &username).await
}

/// Menu for removing a favorite
fn menu_remove_favorite(store: &mut Store, renderer: &mut TableRenderer) -> Result<(), AppError> {
    let Some(login) = select_login(store.entries(), "select favorite to remove:")? else {
        return Ok(());
    };
    delete_favorite(store, renderer, &login, false)
}

/// Menu for showing one favorite
fn menu_show_favorite(store: &Store) -> Result<(), AppError> {
    let Some(login) = select_login(store.entries(), "select favorite to show:")? else {
        return Ok(());
    };
    show_favorite(store, &login)
}

/// Lets the user pick a login, `None` when they go back
fn select_login(entries: &[ProfileSummary], prompt: &str) -> Result<Option<String>, AppError> {
    if entries.is_empty() {
        return Err(AppError::Validation("no favorites found".to_string()));
    }

    let logins: Vec<String> = build_login_list(entries);
    let selected: String = Select::new(&format!("{}", prompt.blue()), logins).prompt()?;

    Ok((selected != BACK_OPTION).then_some(selected))
}

/// Builds list of logins for menu to display
pub fn build_login_list(entries: &[ProfileSummary]) -> Vec<String> {
    let mut logins: Vec<String> = entries.iter()
        .map(|entry| entry.login.clone())
        .collect();
    logins.push(BACK_OPTION.to_string());
    logins
}
