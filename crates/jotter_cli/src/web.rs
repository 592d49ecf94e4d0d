//! Local presentation server.
//!
//! Every request re-reads the template and the notes, so edits made from
//! another terminal show up on refresh without a restart.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use jotter_core::{render_page, NoteRepository, NoteService, DEFAULT_TEMPLATE};
use log::{error, info, warn};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

pub struct WebState<R: NoteRepository> {
    service: Arc<NoteService<R>>,
    template_path: PathBuf,
}

impl<R: NoteRepository> WebState<R> {
    pub fn new(service: NoteService<R>, template_path: PathBuf) -> Self {
        Self {
            service: Arc::new(service),
            template_path,
        }
    }
}

pub fn router<R>(state: Arc<WebState<R>>) -> Router
where
    R: NoteRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<R>))
        .fallback(index::<R>)
        .with_state(state)
}

/// Binds `host:port`, optionally opens a browser, and serves until Ctrl-C.
pub async fn serve<R>(state: WebState<R>, host: IpAddr, port: u16, open: bool) -> Result<()>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))?;
    let bound = listener.local_addr().context("Failed to read bound address")?;
    let url = browse_url(bound);

    info!("event=web_start module=web status=ok addr={bound}");
    println!("server on {url}");
    if open {
        open_browser(&url);
    }

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server stopped unexpectedly")?;

    info!("event=web_stop module=web status=ok");
    Ok(())
}

/// URL shown to the user and opened in the browser for `bound`.
///
/// Loopback and wildcard binds are reachable as `localhost`; any other
/// address is used as is.
fn browse_url(bound: SocketAddr) -> String {
    let ip = bound.ip();
    if ip.is_loopback() || ip.is_unspecified() {
        format!("http://localhost:{}", bound.port())
    } else {
        format!("http://{bound}")
    }
}

async fn index<R>(State(state): State<Arc<WebState<R>>>) -> Response
where
    R: NoteRepository + Send + Sync + 'static,
{
    let started_at = Instant::now();
    match render_index(&state).await {
        Ok(page) => {
            info!(
                "event=web_render module=web status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Html(page).into_response()
        }
        Err(err) => {
            error!(
                "event=web_render module=web status=error duration_ms={} error={:#}",
                started_at.elapsed().as_millis(),
                err
            );
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

async fn render_index<R>(state: &WebState<R>) -> Result<String>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let template = load_template(&state.template_path).await?;
    let service = Arc::clone(&state.service);
    let notes = tokio::task::spawn_blocking(move || service.list_notes())
        .await
        .context("Note listing task failed")??;
    Ok(render_page(&template, &notes))
}

async fn load_template(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(template) => Ok(template),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(DEFAULT_TEMPLATE.to_string()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read template {}", path.display()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=web_signal module=web status=error error={err}");
        std::future::pending::<()>().await;
    }
}

fn open_browser(url: &str) {
    let mut command = browser_command(url);
    match command.spawn() {
        Ok(_) => info!("event=browser_open module=web status=ok"),
        Err(err) => {
            warn!("event=browser_open module=web status=error error={err}");
            eprintln!("Could not open a browser; visit {url} manually");
        }
    }
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> std::process::Command {
    let mut command = std::process::Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> std::process::Command {
    let mut command = std::process::Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> std::process::Command {
    let mut command = std::process::Command::new("xdg-open");
    command.arg(url);
    command
}
