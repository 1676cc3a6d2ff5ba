//! `bastion login`: authenticate and print the issued token.

use anyhow::{bail, Context, Result};

use bastion_service::Session;

use crate::context::{Backend, ConnectionArgs};
use crate::render;

pub async fn login(conn: &ConnectionArgs) -> Result<Session> {
    let Some((email, password)) = conn.credentials()? else {
        bail!("login requires --email and --password");
    };
    let backend = Backend::open(conn)?;
    Session::login(backend.api(), email, password)
        .await
        .context("login failed")
}

pub async fn run_login(conn: &ConnectionArgs) -> Result<u8> {
    let session = login(conn).await?;
    println!("{}", render::user_line(session.user()));
    if let Some(token) = session.token() {
        println!("token: {token}");
    }
    Ok(0)
}
