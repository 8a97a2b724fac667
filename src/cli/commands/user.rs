use crate::cli::parser::{Commands, UserAction};
use crate::cli::{Session, open_pool, target_id};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::user::{Registration, User};
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{GREEN, GREY, RED, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    // registration is the sign-in callback and runs without a caller
    if let UserAction::Register {
        provider,
        account_id,
        name,
        email,
        email_verified,
        picture,
    } = action
    {
        let mut pool = open_pool(cfg)?;
        let reg = Registration {
            provider: provider.clone(),
            provider_account_id: account_id.clone(),
            name: name.clone(),
            email: email.clone(),
            email_verified: Some(*email_verified),
            picture: picture.clone(),
        };

        let (user, created) = UserLogic::register(&mut pool, reg)?;
        if created {
            success(format!("Registered {} <{}>", user.name, user.email));
            if user.admin {
                info("First user: granted administrator rights.");
            }
        } else {
            info(format!("{} <{}> is already registered", user.name, user.email));
        }
        println!("user_id={}", user.id);
        return Ok(());
    }

    let (pool, caller) = session.open(cfg)?;

    match action {
        UserAction::Register { .. } => {}
        UserAction::Show { id, json } => {
            let user = UserLogic::get(&pool.conn, &caller, target_id(&caller, id.as_deref()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                show(&user);
            }
        }
        UserAction::List { json } => {
            let users = UserLogic::list(&pool.conn, &caller)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                println!("{}", render(&users));
            }
        }
        UserAction::Rename { id, name } => {
            let user = UserLogic::rename(&pool.conn, &caller, id, name)?;
            success(format!("User {} renamed to {}", user.id, user.name));
        }
        UserAction::Disable { id } => {
            let user = UserLogic::toggle_disabled(&pool.conn, &caller, id)?;
            let state = if user.disabled { "disabled" } else { "enabled" };
            success(format!("User {} is now {}", user.id, state));
        }
        UserAction::Admin { id, revoke } => {
            let user = UserLogic::set_admin(&pool.conn, &caller, id, !revoke)?;
            let state = if user.admin { "granted" } else { "revoked" };
            success(format!("Administrator rights {} for {}", state, user.id));
        }
    }

    Ok(())
}

fn flag(on: bool, colour: &str) -> String {
    if on {
        format!("{colour}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}

fn show(user: &User) {
    header(&user.name);
    field("id", &user.id);
    field("email", &user.email);
    field("verified", flag(user.email_verified.unwrap_or(false), GREEN));
    field("admin", flag(user.admin, GREEN));
    field("disabled", flag(user.disabled, RED));
    field("created", &user.created_at);
}

fn render(users: &[User]) -> String {
    let mut table = Table::new(&["ID", "NAME", "EMAIL", "ADMIN", "DISABLED"]);
    for u in users {
        table.add_row(vec![
            u.id.clone(),
            u.name.clone(),
            u.email.clone(),
            flag(u.admin, GREEN),
            flag(u.disabled, RED),
        ]);
    }
    table.render()
}
