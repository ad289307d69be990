use crate::err::Error;
use crate::files::routes::{respond_to_request, State};
use crate::http;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

mod listing;
mod path;
mod routes;

pub async fn main(port: u16, directory: PathBuf) -> Result<(), Error> {
    let root = path::canonical_root(&directory).await?;
    let listener = http::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await?;

    println!("{}", startup_banner(port, &root));

    http::serve(listener, State { root }, respond_to_request).await;

    Ok(())
}

fn startup_banner(port: u16, root: &Path) -> String {
    format!(
        "Server running on http://localhost:{}\nServing from: {}",
        port,
        root.display()
    )
}
