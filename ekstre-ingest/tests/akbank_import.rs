//! End-to-end import through the registry, including the windows-1254
//! decoding step that only happens on real files.

use std::io::Write;

use encoding_rs::WINDOWS_1254;

use ekstre_ingest::{ImportError, Importer, find_importer};

const STATEMENT: &str = "\
Kart Türü / No:;Some Axes Card / **** **** **** 1234;
Hesap Özeti;
Tarih;Açıklama;Tutar;Chip Para / Mil;
8.07.2025;MARKET ALISVERISI  ISTANBUL  TR;65,00 TL;0 TL / 0;
;      SUPERMARKET;0,00 TL;0 TL / 0;
17.06.2025;Chip-Para ile Ödeme;-133,60 TL;-133,60 TL / 0;

Akbank T.A.Ş.
";

fn write_windows_1254(content: &str) -> tempfile::NamedTempFile {
    let (bytes, _, unmappable) = WINDOWS_1254.encode(content);
    assert!(!unmappable, "fixture must be representable in windows-1254");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_import_decodes_turkish_text() {
    let file = write_windows_1254(STATEMENT);
    let importer = find_importer("akbank-cc-csv-importer").unwrap();

    let txns = importer.import(file.path()).await.unwrap();

    assert_eq!(txns.len(), 2);
    // "Ö" survives the windows-1254 round trip
    assert_eq!(txns[1].comment, "Chip-Para ile Ödeme");
    assert_eq!(txns[1].amount_minor, -13360);
    assert_eq!(txns[1].category.as_deref(), Some("SUPERMARKET"));
    assert_eq!(txns[0].card.name, "Some Axes Card");
    assert_eq!(txns[0].country.as_ref().unwrap().alpha3, "tur");
}

#[tokio::test]
async fn test_import_preserves_statement_order() {
    let file = write_windows_1254(STATEMENT);
    let txns = Importer::AkbankCcCsv.import(file.path()).await.unwrap();
    // statements are not re-sorted chronologically
    assert!(txns[0].date > txns[1].date);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let err = Importer::AkbankCcCsv
        .import(std::path::Path::new("/nonexistent/statement.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}
