//! `roster`, an interactive terminal client for the user roster service.

use std::sync::Arc;

use clap::Parser;
use reqwest::Url;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use console::api::HttpUserApi;
use console::boundary::{RenderBoundary, RenderOutcome};
use console::view::{SubmitOutcome, UserView};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "roster", about = "Manage users over the roster HTTP API")]
struct Args {
    /// Base URL of the roster API server.
    #[arg(long, env = "ROSTER_API_URL", default_value = "http://127.0.0.1:8080")]
    base_url: Url,
}

const HELP: &str = "\
commands:
  list                  show the current user list
  refresh               reload the list from the server
  add <name> <email>    create a user (or save the selected one)
  edit <id> <name> <email>
                        update an existing user in one step
  select <id>           edit an existing user
  cancel                leave edit mode
  delete <id>           arm deletion of a user (asks for confirmation)
  confirm               perform the armed deletion
  reset                 recover the display after a rendering fault
  help                  show this text
  quit                  exit";

fn render(view: &UserView, boundary: &mut RenderBoundary) {
    let outcome = boundary.render(|| {
        if view.loading() {
            println!("loading...");
            return;
        }
        if view.users().is_empty() {
            println!("no users");
        } else {
            println!("{:>5}  {:<24} {}", "id", "name", "email");
            for user in view.users() {
                let marker = if view.selected().is_some_and(|s| s.id == user.id) {
                    '*'
                } else {
                    ' '
                };
                println!("{marker}{:>4}  {:<24} {}", user.id, user.name, user.email);
            }
        }
        if let Some(selected) = view.selected() {
            println!(
                "editing #{} ('add <name> <email>' saves, 'cancel' aborts)",
                selected.id
            );
        }
        if let Some(error) = view.error() {
            println!("error: {error}");
        }
    });
    if outcome == RenderOutcome::Faulted {
        println!("display failed; type 'reset' to recover");
    }
}

fn report_submit(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Saved(user) => println!("saved #{}", user.id),
        SubmitOutcome::Invalid(errors) => {
            for error in errors {
                println!("{error}");
            }
        }
        SubmitOutcome::Failed => {}
    }
}

async fn dispatch(
    view: &mut UserView,
    boundary: &mut RenderBoundary,
    words: &[String],
) -> bool {
    let (command, rest) = match words.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("", &[][..]),
    };
    match (command, rest) {
        ("quit" | "exit", _) => return false,
        ("help", _) => println!("{HELP}"),
        ("list", _) => render(view, boundary),
        ("refresh", _) => {
            view.refresh().await;
            render(view, boundary);
        }
        ("add", [name, email]) => {
            report_submit(view.submit(name, email).await);
            render(view, boundary);
        }
        ("edit", [id, name, email]) => match id.parse::<u64>() {
            Ok(id) => {
                if view.select(id) {
                    report_submit(view.submit(name, email).await);
                    render(view, boundary);
                } else {
                    println!("no user with id {id}");
                }
            }
            Err(_) => println!("edit takes a numeric id"),
        },
        ("select", [id]) => match id.parse::<u64>() {
            Ok(id) => {
                if view.select(id) {
                    render(view, boundary);
                } else {
                    println!("no user with id {id}");
                }
            }
            Err(_) => println!("select takes a numeric id"),
        },
        ("cancel", _) => {
            view.cancel_selection();
            view.cancel_delete();
            render(view, boundary);
        }
        ("delete", [id]) => match id.parse::<u64>() {
            Ok(id) => {
                view.request_delete(id);
                println!("about to delete user #{id}; type 'confirm' to proceed");
            }
            Err(_) => println!("delete takes a numeric id"),
        },
        ("confirm", _) => {
            if view.confirm_delete().await {
                render(view, boundary);
            } else {
                println!("nothing armed for deletion");
            }
        }
        ("reset", _) => {
            boundary.reset();
            render(view, boundary);
        }
        ("", _) => {}
        _ => println!("unknown command; type 'help'"),
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let api = Arc::new(HttpUserApi::new(args.base_url));
    let mut view = UserView::new(api);
    let mut boundary = RenderBoundary::new();

    view.refresh().await;
    render(&view, &mut boundary);

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("roster> ") {
            Ok(line) => {
                let words = match shell_words::split(&line) {
                    Ok(words) => words,
                    Err(err) => {
                        println!("could not parse input: {err}");
                        continue;
                    }
                };
                if !words.is_empty() {
                    let _ = editor.add_history_entry(&line);
                }
                if !dispatch(&mut view, &mut boundary, &words).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use console::api::{ApiError, UserApi};
    use console::model::{User, UserDraft};

    /// Minimal in-memory double so commands can be driven end to end.
    #[derive(Default)]
    struct StubApi {
        users: Mutex<Vec<User>>,
    }

    impl StubApi {
        fn with_users(users: Vec<User>) -> Arc<Self> {
            Arc::new(Self {
                users: Mutex::new(users),
            })
        }
    }

    #[async_trait]
    impl UserApi for StubApi {
        async fn get_users(&self) -> Result<Vec<User>, ApiError> {
            Ok(self.users.lock().expect("lock").clone())
        }

        async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
            let mut users = self.users.lock().expect("lock");
            let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let user = User {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
            let mut users = self.users.lock().expect("lock");
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "not found".to_owned(),
                })?;
            user.name = draft.name.clone();
            user.email = draft.email.clone();
            Ok(user.clone())
        }

        async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
            let mut users = self.users.lock().expect("lock");
            let len = users.len();
            users.retain(|u| u.id != id);
            if users.len() == len {
                return Err(ApiError::Status {
                    status: 404,
                    body: "not found".to_owned(),
                });
            }
            Ok(())
        }
    }

    fn words(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_owned()).collect()
    }

    async fn ready_view(users: Vec<User>) -> UserView {
        let mut view = UserView::new(StubApi::with_users(users));
        view.refresh().await;
        view
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn edit_command_updates_a_user_in_one_step() {
        let mut view = ready_view(vec![user(1, "Ada")]).await;
        let mut boundary = RenderBoundary::new();

        let keep_going = dispatch(
            &mut view,
            &mut boundary,
            &words(&["edit", "1", "Ada Lovelace", "lovelace@example.com"]),
        )
        .await;

        assert!(keep_going);
        assert_eq!(view.users().len(), 1);
        assert_eq!(view.users()[0].name, "Ada Lovelace");
        assert_eq!(view.users()[0].email, "lovelace@example.com");
        assert!(view.selected().is_none(), "edit mode ends after save");
    }

    #[rstest]
    #[tokio::test]
    async fn edit_command_rejects_an_unknown_id() {
        let mut view = ready_view(vec![user(1, "Ada")]).await;
        let mut boundary = RenderBoundary::new();

        dispatch(
            &mut view,
            &mut boundary,
            &words(&["edit", "9", "Ghost", "ghost@example.com"]),
        )
        .await;

        assert_eq!(view.users()[0].name, "Ada");
        assert!(view.selected().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn edit_command_requires_a_numeric_id() {
        let mut view = ready_view(vec![user(1, "Ada")]).await;
        let mut boundary = RenderBoundary::new();

        dispatch(
            &mut view,
            &mut boundary,
            &words(&["edit", "one", "Ada", "ada@example.com"]),
        )
        .await;

        assert_eq!(view.users()[0].name, "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut view = ready_view(Vec::new()).await;
        let mut boundary = RenderBoundary::new();

        assert!(!dispatch(&mut view, &mut boundary, &words(&["quit"])).await);
    }
}
