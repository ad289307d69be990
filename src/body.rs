use crate::err::Error;
use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::StreamBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::{Body, Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

pub type BoxedBody = BoxBody<Bytes, Error>;

pub fn empty<E>() -> BoxBody<Bytes, E> {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn full<E>(bytes: impl Into<Bytes>) -> BoxBody<Bytes, E> {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn from_file(file: File) -> impl Body<Data = Bytes, Error = io::Error> {
    let stream = ReaderStream::with_capacity(file, 64 * 1024);
    StreamBody::new(stream.map_ok(Frame::data))
}
