//! Demo handlers built on [`Context`].

use axum::extract::Path;
use axum::http::StatusCode;
use rasn::{AsnType, Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::bind_form;
use crate::context::{Context, ContextError};
use crate::render::Format;

/// Sign-up form submitted to `/signup/{format}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, AsnType, Encode, Decode)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub age: u32,
    pub newsletter: Option<bool>,
}

bind_form! {
    SignUp {
        username => "username", valid = r"^[a-z0-9_]{3,16}$",
            msg = "username must be 3-16 characters of a-z, 0-9 or _";
        email => "email", valid = r"^[^@\s]+@[^@\s]+\.[^@\s]+$", msg = "email address is invalid";
        age => "age";
        newsletter => "newsletter";
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health(mut ctx: Context) -> Result<Context, ContextError> {
    ctx.json(&HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })?;
    Ok(ctx)
}

/// Bind a [`SignUp`] and echo it back in the format named by the path.
pub async fn signup(
    Path(format): Path<String>,
    mut ctx: Context,
) -> Result<Context, ContextError> {
    let format: Format = match format.parse() {
        Ok(format) => format,
        Err(reason) => {
            ctx.status(StatusCode::NOT_FOUND);
            ctx.write(reason.as_bytes());
            return Ok(ctx);
        }
    };

    let form: SignUp = ctx.bind_form()?;
    tracing::info!(username = %form.username, format = %format, "Sign-up accepted");

    ctx.status(StatusCode::CREATED);
    ctx.head("Location", &format!("/users/{}", form.username))?;
    match format {
        Format::Json => ctx.json(&form)?,
        Format::Xml => ctx.xml(&form)?,
        Format::Asn1 => ctx.asn1(&form)?,
    }
    Ok(ctx)
}

/// Echo every submitted form pair as a JSON array of `[name, value]`.
pub async fn echo(mut ctx: Context) -> Result<Context, ContextError> {
    let pairs: Vec<(String, String)> = ctx
        .form()?
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ctx.json(&pairs)?;
    Ok(ctx)
}
