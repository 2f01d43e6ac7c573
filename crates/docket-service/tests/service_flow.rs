//! End-to-end service flow against an in-memory database.

use docket_service::{
    Currency, Database, DbConfig, DocType, DocumentService, ErrorCode, ExportFormat, LineItem,
    Party, PrintPdfRenderer,
};

async fn service() -> DocumentService {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    DocumentService::new(db)
}

async fn service_with_pdf() -> DocumentService {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    DocumentService::new(db).with_pdf_renderer(PrintPdfRenderer::default())
}

fn fill(doc: &mut docket_service::Document) {
    doc.seller = Party::named("Seller Co.");
    doc.buyer = Party::named("Buyer Ltd.");
    doc.payment_method = "Cash".to_string();
    doc.items = vec![
        LineItem::new("Widget", 2.0, "pcs", 300.0),
        LineItem::new("Gadget", 1.0, "pcs", 0.0),
    ];
    doc.recalculate(0.0, 0.0, 7.0);
}

#[tokio::test]
async fn save_assigns_number_exactly_once() {
    let svc = service().await;
    let mut doc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut doc);
    assert!(doc.is_draft());

    let first_no = svc.save(&mut doc).await.unwrap();
    assert!(first_no.starts_with("RC-"));
    assert!(!doc.is_draft());

    // Second save keeps the number and overwrites the record
    doc.note = "edited".to_string();
    let second_no = svc.save(&mut doc).await.unwrap();
    assert_eq!(first_no, second_no);

    let summaries = svc.list(10).await.unwrap();
    assert_eq!(summaries.len(), 1);
}

#[tokio::test]
async fn save_then_load_roundtrip() {
    let svc = service().await;
    let mut doc = svc.new_document(DocType::PurchaseOrder, Currency::Usd);
    fill(&mut doc);
    doc.note = "Net 30".to_string();

    let doc_no = svc.save(&mut doc).await.unwrap();
    assert!(doc_no.starts_with("PO-"));

    let loaded = svc.load(&doc_no).await.unwrap();
    assert_eq!(loaded.doc_no, doc_no);
    assert_eq!(loaded.doc_type, DocType::PurchaseOrder);
    assert_eq!(loaded.currency, Currency::Usd);
    assert_eq!(loaded.items.len(), 2);
    assert_eq!(loaded.items[0].description, "Widget");
    assert_eq!(loaded.note, "Net 30");
    assert_eq!(loaded.totals, doc.totals);
}

#[tokio::test]
async fn save_recalculates_stale_totals() {
    let svc = service().await;
    let mut doc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut doc);

    // Simulate a form edit after the last recalculation
    doc.items[0].unit_price = 500.0;
    svc.save(&mut doc).await.unwrap();

    // 2 × 500 + 1 × 0 = 1000, VAT 7% = 70
    assert_eq!(doc.totals.subtotal, 1000.0);
    assert_eq!(doc.totals.vat_amount, 70.0);
    assert_eq!(doc.totals.total, 1070.0);

    let loaded = svc.load(&doc.doc_no).await.unwrap();
    assert_eq!(loaded.totals.total, 1070.0);
}

#[tokio::test]
async fn load_missing_reports_not_found() {
    let svc = service().await;
    let err = svc.load("RC-20260823-0099").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(err.message.contains("RC-20260823-0099"));
}

#[tokio::test]
async fn export_uses_document_number_as_filename() {
    let svc = service().await;
    let mut doc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut doc);
    let doc_no = svc.save(&mut doc).await.unwrap();

    let csv = svc.export(&doc, ExportFormat::Csv).unwrap();
    assert_eq!(csv.filename, format!("{}.csv", doc_no));
    assert_eq!(csv.mime, "text/csv");
    assert!(!csv.bytes.is_empty());

    let html = svc.export(&doc, ExportFormat::Html).unwrap();
    assert_eq!(html.filename, format!("{}.html", doc_no));
    assert!(String::from_utf8(html.bytes).unwrap().contains(&doc_no));
}

#[tokio::test]
async fn draft_export_falls_back_to_generic_filename() {
    let svc = service().await;
    let mut doc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut doc);

    // Unsaved draft has no number yet
    let file = svc.export(&doc, ExportFormat::Csv).unwrap();
    assert_eq!(file.filename, "document.csv");
}

#[tokio::test]
async fn pdf_without_renderer_is_unavailable() {
    let svc = service().await;
    let doc = svc.new_document(DocType::Receipt, Currency::Thb);

    assert_eq!(
        svc.available_formats(),
        vec![ExportFormat::Csv, ExportFormat::Html]
    );
    let err = svc.export(&doc, ExportFormat::Pdf).unwrap_err();
    assert_eq!(err.code, ErrorCode::PdfUnavailable);
}

#[tokio::test]
async fn pdf_with_renderer_produces_bytes() {
    let svc = service_with_pdf().await;
    let mut doc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut doc);
    svc.save(&mut doc).await.unwrap();

    assert!(svc.available_formats().contains(&ExportFormat::Pdf));
    let file = svc.export(&doc, ExportFormat::Pdf).unwrap();
    assert_eq!(file.mime, "application/pdf");
    assert!(file.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn receipt_and_purchase_order_share_the_day_counter() {
    let svc = service().await;

    let mut rc = svc.new_document(DocType::Receipt, Currency::Thb);
    fill(&mut rc);
    let mut po = svc.new_document(DocType::PurchaseOrder, Currency::Thb);
    fill(&mut po);

    let rc_no = svc.save(&mut rc).await.unwrap();
    let po_no = svc.save(&mut po).await.unwrap();

    // Same day key, consecutive counters across prefixes
    let rc_counter: u32 = rc_no.rsplit('-').next().unwrap().parse().unwrap();
    let po_counter: u32 = po_no.rsplit('-').next().unwrap().parse().unwrap();
    assert_eq!(po_counter, rc_counter + 1);
}
