//! HTTP host: a form page plus a `/plot` endpoint serving rendered images.
//!
//! Every request is handed to the shared [`Plotter`] on a blocking task,
//! since rendering waits on the external Graphviz process.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Form},
    http::{Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use log::{error, info};
use serde::Deserialize;

use crate::error::{PlotError, Result};
use crate::plotter::Plotter;
use crate::registry::GrexLookup;

/// Body or query string of a `/plot` request.
#[derive(Debug, Deserialize)]
pub struct PlotForm {
    /// Comma-separated grex names.
    #[serde(default)]
    pub grexes: String,
}

fn root_page(max_names: usize) -> String {
    format!(
        r#"
<h1>Orchid Genealogy Plotter</h1>
<form action="/plot" method="POST">
    <div>Grexes (up to {max_names}, comma-separated: Aladin, Madame Martinet)</div>
    <div><input name="grexes" type="text"></div>
    <div><input type="submit" value="Go"></div>
</form>
"#
    )
}

async fn handle_root<L: GrexLookup + 'static>(
    Extension(plotter): Extension<Arc<Plotter<L>>>,
) -> Html<String> {
    Html(root_page(plotter.config().max_names))
}

async fn handle_plot<L: GrexLookup + 'static>(
    Extension(plotter): Extension<Arc<Plotter<L>>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    Form(form): Form<PlotForm>,
) -> Response {
    let origin = format!("{peer},{method},{uri}");
    let result =
        tokio::task::spawn_blocking(move || plotter.plot_for(&origin, &form.grexes)).await;

    match result {
        Ok(Ok(plotted)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, plotted.format.content_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}\"", plotted.file_name()),
                ),
            ],
            plotted.bytes,
        )
            .into_response(),
        Ok(Err(e)) => plain_error(status_for(&e), e.to_string()),
        Err(e) => {
            error!("plot task failed: {}", e);
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        }
    }
}

/// Query mistakes are the caller's; everything else is ours.
pub fn status_for(e: &PlotError) -> StatusCode {
    match e {
        PlotError::InvalidQuery(_) | PlotError::NotFound(_) => StatusCode::BAD_REQUEST,
        PlotError::CyclicGraph { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PlotError::RenderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn plain_error(status: StatusCode, msg: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        msg,
    )
        .into_response()
}

/// `/` serves the form, `/plot` accepts the `grexes` field by GET or POST.
pub fn router<L: GrexLookup + 'static>(plotter: Arc<Plotter<L>>) -> Router {
    Router::new()
        .route("/", get(handle_root::<L>))
        .route("/plot", get(handle_plot::<L>).post(handle_plot::<L>))
        .layer(Extension(plotter))
}

/// Serve on an already-bound listener until the server fails.
pub async fn serve<L: GrexLookup + 'static>(
    listener: TcpListener,
    plotter: Arc<Plotter<L>>,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let server = axum::Server::from_tcp(listener)
        .map_err(|e| PlotError::Server(e.to_string()))?;
    info!("listening on {}", addr);
    server
        .serve(router(plotter).into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| PlotError::Server(e.to_string()))
}

#[cfg(test)]
#[path = "../tests/rust/test_server.rs"]
mod tests;
