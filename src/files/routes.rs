use crate::body::{self, BoxedBody};
use crate::err::Error;
use crate::files::{listing, path};
use headers::{ContentLength, ContentType, HeaderMapExt, IfModifiedSince, LastModified};
use http::request::Parts;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::http::HeaderValue;
use hyper::{header, Method, Request, Response, StatusCode};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

pub struct State {
    pub root: PathBuf,
}

pub async fn respond_to_request(req: Request<Incoming>, state: &State) -> Response<BoxedBody> {
    let (parts, _body) = req.into_parts();
    respond(&parts, state).await
}

pub async fn respond(req: &Parts, state: &State) -> Response<BoxedBody> {
    match req.method {
        Method::OPTIONS => {
            log::info!("{} {} -> [preflight response]", req.method, req.uri);
            let mut resp = Response::new(body::empty());
            resp.headers_mut().typed_insert(ContentLength(0));
            resp
        }
        Method::GET | Method::HEAD => get(req, state).await,
        _ => {
            log::warn!("{} {} -> [unsupported method]", req.method, req.uri);
            error_page(
                StatusCode::NOT_IMPLEMENTED,
                &format!("Unsupported method ({})", req.method),
            )
        }
    }
}

async fn get(req: &Parts, state: &State) -> Response<BoxedBody> {
    let uri_path = req.uri.path();
    let target = path::translate(&state.root, uri_path);

    let metadata = match fs::metadata(&target).await {
        Ok(m) => m,
        Err(e) => return file_error(req, &target, e),
    };

    if metadata.is_dir() {
        if !uri_path.ends_with('/') {
            return redirect_to_directory(req);
        }
        for index in INDEX_FILES {
            let index_path = target.join(index);
            if let Ok(m) = fs::metadata(&index_path).await {
                if m.is_file() {
                    return send_file(req, &index_path).await;
                }
            }
        }
        return list_directory(req, &target).await;
    }

    if uri_path.ends_with('/') {
        log::info!("{} {} -> [not a directory]", req.method, req.uri);
        return error_page(StatusCode::NOT_FOUND, "File not found");
    }

    send_file(req, &target).await
}

async fn send_file(req: &Parts, path: &Path) -> Response<BoxedBody> {
    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => return file_error(req, path, e),
    };
    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => return file_error(req, path, e),
    };
    let modified = metadata.modified().ok();

    if let (Some(modified), Some(since)) = (modified, req.headers.typed_get::<IfModifiedSince>()) {
        // If-None-Match takes precedence, and we don't do etags
        if !req.headers.contains_key(header::IF_NONE_MATCH) && !since.is_modified(modified) {
            log::info!("{} {} -> [not modified]", req.method, req.uri);
            let mut resp = Response::new(body::empty());
            *resp.status_mut() = StatusCode::NOT_MODIFIED;
            return resp;
        }
    }

    let len = metadata.len();
    log::info!(
        "{} {} -> [found {} bytes] {}",
        req.method,
        req.uri,
        len,
        path.display()
    );
    let mut resp = if req.method == Method::HEAD {
        Response::new(body::empty())
    } else {
        Response::new(body::from_file(file).map_err(Error::from).boxed())
    };
    let headers = resp.headers_mut();
    headers.typed_insert(ContentType::from(
        mime_guess::from_path(path).first_or_octet_stream(),
    ));
    headers.typed_insert(ContentLength(len));
    if let Some(modified) = modified {
        headers.typed_insert(LastModified::from(modified));
    }
    resp
}

async fn list_directory(req: &Parts, dir: &Path) -> Response<BoxedBody> {
    let entries = match listing::read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("{} {} -> [listing error] {}", req.method, req.uri, e);
            return error_page(StatusCode::NOT_FOUND, "No permission to list directory");
        }
    };
    log::info!(
        "{} {} -> [listing {} entries]",
        req.method,
        req.uri,
        entries.len()
    );
    let html = listing::render(&path::decode(req.uri.path()), &entries);
    html_response(StatusCode::OK, html)
}

fn redirect_to_directory(req: &Parts) -> Response<BoxedBody> {
    let location = match req.uri.query() {
        Some(query) => format!("{}/?{}", req.uri.path(), query),
        None => format!("{}/", req.uri.path()),
    };
    let location = match HeaderValue::try_from(location) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("{} {} -> [invalid redirect] {}", req.method, req.uri, e);
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect");
        }
    };
    log::info!("{} {} -> [redirect] {:?}", req.method, req.uri, location);
    let mut resp = Response::new(body::empty());
    *resp.status_mut() = StatusCode::MOVED_PERMANENTLY;
    resp.headers_mut().insert(header::LOCATION, location);
    resp.headers_mut().typed_insert(ContentLength(0));
    resp
}

fn file_error(req: &Parts, path: &Path, e: io::Error) -> Response<BoxedBody> {
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            log::warn!(
                "{} {} -> [permission denied] {}",
                req.method,
                req.uri,
                path.display()
            );
            error_page(StatusCode::FORBIDDEN, "Permission denied")
        }
        io::ErrorKind::NotFound => {
            log::info!("{} {} -> [not found]", req.method, req.uri);
            error_page(StatusCode::NOT_FOUND, "File not found")
        }
        _ => {
            log::warn!(
                "{} {} -> [file error] {} : {}",
                req.method,
                req.uri,
                path.display(),
                e
            );
            error_page(StatusCode::NOT_FOUND, "File not found")
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response<BoxedBody> {
    let html = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>Error response</title>\n",
            "</head>\n",
            "<body>\n",
            "<h1>Error response</h1>\n",
            "<p>Error code: {code}</p>\n",
            "<p>Message: {message}.</p>\n",
            "<p>Error code explanation: {code} - {explanation}.</p>\n",
            "</body>\n",
            "</html>\n",
        ),
        code = status.as_u16(),
        message = listing::escape(message),
        explanation = explanation(status)
    );
    html_response(status, html)
}

fn explanation(status: StatusCode) -> &'static str {
    match status {
        StatusCode::FORBIDDEN => "Request forbidden -- authorization will not help",
        StatusCode::NOT_FOUND => "Nothing matches the given URI",
        StatusCode::INTERNAL_SERVER_ERROR => "Server got itself in trouble",
        StatusCode::NOT_IMPLEMENTED => "Server does not support this operation",
        _ => status.canonical_reason().unwrap_or("Unknown error"),
    }
}

fn html_response(status: StatusCode, html: String) -> Response<BoxedBody> {
    let len = html.len() as u64;
    let mut resp = Response::new(body::full(html));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    resp.headers_mut().typed_insert(ContentLength(len));
    resp
}
