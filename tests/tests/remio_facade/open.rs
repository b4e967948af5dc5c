use std::io::{Read, Seek, SeekFrom, Write};

use remio::{OpenConfig, RemioError, stream::ReaderOptions};
use remio_test_utils::RangeServer;
use rstest::rstest;

use crate::common::{ALPHABET, blocking, init_tracing, server};

#[rstest]
#[case::seekable(true, 4)]
#[case::forward_only(false, 1)]
#[tokio::test(flavor = "multi_thread")]
async fn test_open_http_uri(
    #[future] server: RangeServer,
    #[case] seekable: bool,
    #[case] expected_hits: usize,
) {
    let server = server.await;
    let uri = server.url("/file").to_string();

    blocking(move || {
        let config = OpenConfig::default()
            .with_seekable(seekable)
            .with_reader(ReaderOptions::default().with_buffer_size(8));
        let mut reader = remio::open(&uri, config).unwrap();
        assert_eq!(reader.seekable(), seekable);

        let mut prefix = [0u8; 3];
        reader.read_exact(&mut prefix).unwrap();
        assert_eq!(&prefix, b"abc");

        if seekable {
            for target in [25u64, 0, 13] {
                assert_eq!(reader.seek(SeekFrom::Start(target)).unwrap(), target);
                let mut byte = [0u8; 1];
                reader.read_exact(&mut byte).unwrap();
                assert_eq!(byte[0], ALPHABET[target as usize]);
            }
        }
    })
    .await;

    assert_eq!(server.hits(), expected_hits);
}

#[test]
fn test_open_local_file_uri() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ALPHABET).unwrap();
    let uri = url::Url::from_file_path(file.path()).unwrap();

    let mut reader = remio::open(uri.as_str(), OpenConfig::default()).unwrap();
    reader.seek(SeekFrom::End(-3)).unwrap();
    let mut tail = String::new();
    reader.read_to_string(&mut tail).unwrap();

    assert_eq!(tail, "xyz");
}

#[test]
fn test_open_rejects_unknown_scheme() {
    assert!(matches!(
        remio::open("gs://bucket/object", OpenConfig::default()),
        Err(RemioError::UnsupportedScheme(scheme)) if scheme == "gs"
    ));
}
