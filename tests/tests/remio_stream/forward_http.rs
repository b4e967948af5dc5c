use std::io::Read;

use remio::{
    net::Auth,
    stream::{ForwardOnlyStreamReader, ReaderOptions, StreamError, StreamReader, Whence},
};
use remio_test_utils::RangeServer;
use rstest::rstest;

use crate::common::{ALPHABET, blocking, server};

#[rstest]
#[case::file("/file")]
#[case::no_ranges("/no-ranges")]
#[case::chunked("/chunked")]
#[tokio::test(flavor = "multi_thread")]
async fn test_reads_whole_resource_once(#[future] server: RangeServer, #[case] path: &str) {
    let server = server.await;
    let url = server.url(path);

    blocking(move || {
        let options = ReaderOptions::default().with_buffer_size(5);
        let mut reader = ForwardOnlyStreamReader::open(url, Auth::None, options).unwrap();

        assert_eq!(&reader.read_bytes(Some(10)).unwrap()[..], b"abcdefghij");
        assert_eq!(&reader.read_bytes(Some(10)).unwrap()[..], b"klmnopqrst");
        assert_eq!(&reader.read_bytes(Some(100)).unwrap()[..], b"uvwxyz");
        assert!(reader.read_bytes(Some(1)).unwrap().is_empty());
    })
    .await;

    assert_eq!(server.hits(), 1);
    assert_eq!(server.accept_encodings(), vec![Some("identity".to_owned())]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_forward_only_never_seeks(#[future] server: RangeServer) {
    let server = server.await;
    let url = server.url("/file");

    blocking(move || {
        let mut reader =
            ForwardOnlyStreamReader::open(url, Auth::None, ReaderOptions::default()).unwrap();

        assert!(matches!(reader.seek_to(0, Whence::Start), Err(StreamError::NotSeekable)));
        let mut all = Vec::new();
        reader.read_to_end(&mut all).unwrap();
        assert_eq!(all, ALPHABET);
    })
    .await;

    assert_eq!(server.hits(), 1);
}
