//! Auth command implementations: register, login, logout, whoami.

use crate::auth;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::Context;

#[derive(serde::Serialize)]
struct RegisterReport<'a> {
    email: &'a str,
}

#[derive(serde::Serialize)]
struct LoginReport<'a> {
    email: &'a str,
    logged_in: bool,
}

#[derive(serde::Serialize)]
struct SessionReport {
    logged_in: bool,
}

pub fn run_register(ctx: &Context, name: &str, email: &str, password: &str) -> Result<()> {
    auth::register(&ctx.api, name, email, password)?;

    let mut human = HumanOutput::new("td register: account created");
    human.push_summary("email", email.trim());
    human.push_detail("Account created successfully! Please login.".to_string());
    human.push_next_step(format!("td login {} <password>", email.trim()));

    emit_success(
        OutputOptions {
            json: ctx.json,
            quiet: ctx.quiet,
        },
        "register",
        &RegisterReport {
            email: email.trim(),
        },
        Some(&human),
    )
}

pub fn run_login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let mut session = ctx.session()?;
    auth::login(&ctx.api, &mut session, email, password)?;

    let mut human = HumanOutput::new("td login: welcome");
    human.push_summary("email", email.trim());
    human.push_summary("api", ctx.api.base_url());
    human.push_next_step("td task ls".to_string());
    human.push_next_step("td ui".to_string());

    emit_success(
        OutputOptions {
            json: ctx.json,
            quiet: ctx.quiet,
        },
        "login",
        &LoginReport {
            email: email.trim(),
            logged_in: true,
        },
        Some(&human),
    )
}

pub fn run_logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let was_logged_in = session.is_logged_in();
    session.clear()?;

    let header = if was_logged_in {
        "td logout: session cleared"
    } else {
        "td logout: no active session"
    };
    let mut human = HumanOutput::new(header);
    human.push_next_step("td login <email> <password>".to_string());

    emit_success(
        OutputOptions {
            json: ctx.json,
            quiet: ctx.quiet,
        },
        "logout",
        &SessionReport { logged_in: false },
        Some(&human),
    )
}

pub fn run_whoami(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let logged_in = session.is_logged_in();

    let header = if logged_in {
        "td whoami: logged in"
    } else {
        "td whoami: not logged in"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("api", ctx.api.base_url());
    if !logged_in {
        human.push_next_step("td login <email> <password>".to_string());
    }

    emit_success(
        OutputOptions {
            json: ctx.json,
            quiet: ctx.quiet,
        },
        "whoami",
        &SessionReport { logged_in },
        Some(&human),
    )
}
