use std::io::{BufRead, Read, Seek, SeekFrom};

use remio::{
    net::Auth,
    stream::{ReaderOptions, SeekableStreamReader, StreamError, StreamReader, Whence},
};
use remio_test_utils::RangeServer;
use rstest::rstest;

use crate::common::{ALPHABET, blocking, server};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_seek_and_read_over_http(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/file");

    blocking(move || {
        let mut reader =
            SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();
        assert!(reader.seekable());
        assert_eq!(reader.content_length(), Some(26));

        assert_eq!(reader.seek_to(20, Whence::Start).unwrap(), 20);
        assert_eq!(&reader.read_bytes(Some(6)).unwrap()[..], b"uvwxyz");
        assert_eq!(reader.seek_to(-5, Whence::End).unwrap(), 21);
        assert_eq!(&reader.read_bytes(Some(5)).unwrap()[..], b"vwxyz");
    })
    .await;

    assert_eq!(server.hits(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_requests_identity_encoding(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/file");

    blocking(move || {
        let mut reader =
            SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();
        reader.seek_to(3, Whence::Start).unwrap();
    })
    .await;

    let identity = Some("identity".to_owned());
    assert_eq!(server.accept_encodings(), vec![identity.clone(), identity]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_noop_and_end_seeks_do_not_request(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/file");

    blocking(move || {
        let mut reader =
            SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();
        reader.read_bytes(Some(7)).unwrap();

        assert_eq!(reader.seek_to(0, Whence::Current).unwrap(), 7);
        assert_eq!(reader.seek_to(7, Whence::Start).unwrap(), 7);
        assert_eq!(reader.seek_to(0, Whence::End).unwrap(), 26);
        assert_eq!(reader.seek_to(1000, Whence::Start).unwrap(), 26);
        assert!(reader.read_bytes(Some(1)).unwrap().is_empty());
    })
    .await;

    assert_eq!(server.hits(), 1);
}

#[rstest]
#[case::no_ranges("/no-ranges", Some(26))]
#[case::chunked("/chunked", None)]
#[tokio::test(flavor = "multi_thread")]
async fn test_not_seekable_still_reads(
    #[future] server: RangeServer,
    #[case] path: &str,
    #[case] length: Option<u64>,
) {
    let server = server.await;
    let url = server.url(path);

    blocking(move || {
        let mut reader =
            SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();

        assert!(!reader.seekable());
        assert_eq!(reader.content_length(), length);
        assert!(matches!(reader.seek_to(0, Whence::Start), Err(StreamError::NotSeekable)));
        assert_eq!(&reader.read_bytes(None).unwrap()[..], ALPHABET);
        assert_eq!(reader.tell().unwrap(), 26);
    })
    .await;

    assert_eq!(server.hits(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_failed_reseek_leaves_reader_broken(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/flaky");

    blocking(move || {
        let mut reader =
            SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();
        assert_eq!(&reader.read_bytes(Some(3)).unwrap()[..], b"abc");

        let err = reader.seek_to(10, Whence::Start).unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert!(reader.is_broken());
        assert_eq!(reader.tell().unwrap(), 10);
        assert!(matches!(reader.read_bytes(Some(1)), Err(StreamError::Broken)));
    })
    .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_missing_resource_fails_to_open(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/missing");

    let err = blocking(move || {
        SeekableStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap_err()
    })
    .await;

    assert_eq!(err.status_code(), Some(404));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_std_io_traits_over_http(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/file");

    blocking(move || {
        let options = ReaderOptions::default().with_buffer_size(4);
        let mut reader = SeekableStreamReader::open(url, Auth::None, options).unwrap();

        reader.seek(SeekFrom::Start(22)).unwrap();
        let mut tail = Vec::new();
        reader.read_to_end(&mut tail).unwrap();
        assert_eq!(tail, b"wxyz");

        reader.rewind().unwrap();
        let mut head = [0u8; 5];
        reader.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"abcde");

        assert_eq!(reader.fill_buf().unwrap(), b"fgh");
        reader.consume(2);
        assert_eq!(reader.stream_position().unwrap(), 7);
    })
    .await;
}
