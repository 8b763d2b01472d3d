//! The `mockview signup`, `login`, `logout`, and `whoami` commands.

use anyhow::Result;

use mockview_store::Signup;

use crate::app::{App, GlobalArgs, Screen};

pub struct SignupArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn signup(global: &GlobalArgs, args: SignupArgs) -> Result<()> {
    let mut app = App::load(global)?;
    app.goto(Screen::Signup)?;

    let user = app.accounts.signup(&Signup {
        name: &args.name,
        email: &args.email,
        password: &args.password,
        confirm_password: &args.confirm_password,
    })?;
    app.goto(Screen::Home)?;

    println!("Welcome, {}! Your account is ready.", user.name);
    println!("Run `mockview start --role <ROLE>` to begin a practice interview.");
    Ok(())
}

pub fn login(global: &GlobalArgs, email: String, password: String) -> Result<()> {
    let mut app = App::load(global)?;

    let user = app.accounts.login(&email, &password)?;
    app.goto(Screen::Home)?;

    println!("Signed in as {} <{}>", user.name, user.email);
    print_saved_progress_hint(&app, &user.email)?;
    Ok(())
}

pub fn logout(global: &GlobalArgs) -> Result<()> {
    let app = App::load(global)?;
    match app.accounts.current_user()? {
        Some(user) => {
            app.accounts.logout()?;
            println!("Signed out {}", user.email);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn whoami(global: &GlobalArgs) -> Result<()> {
    let app = App::load(global)?;
    match app.accounts.current_user()? {
        Some(user) => {
            println!("Signed in as {} <{}>", user.name, user.email);
            print_saved_progress_hint(&app, &user.email)?;
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

fn print_saved_progress_hint(app: &App, email: &str) -> Result<()> {
    if let Some(progress) = app.progress.load(email)? {
        println!(
            "You have an unfinished {} interview ({} of {} answered). Run `mockview resume` to continue.",
            progress.config.job_role,
            progress.answers.len(),
            progress.questions.questions.len()
        );
    }
    Ok(())
}
