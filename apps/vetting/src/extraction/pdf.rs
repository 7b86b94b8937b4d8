use super::ExtractionError;

/// Concatenates the text layer of every page in page order. Pages without a
/// text layer contribute nothing; scanned PDFs therefore come back empty.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
    Ok(pages.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::test_support::make_pdf;

    #[test]
    fn test_pages_concatenated_in_order() {
        let text = extract_pdf_text(&make_pdf(&["Alpha", "Omega"])).unwrap();
        let alpha = text.find("Alpha").expect("first page text present");
        let omega = text.find("Omega").expect("second page text present");
        assert!(alpha < omega, "pages out of order: {text:?}");
    }

    #[test]
    fn test_blank_page_contributes_empty_segment() {
        let text = extract_pdf_text(&make_pdf(&["Alpha", "", "Omega"])).unwrap();
        let alpha = text.find("Alpha").expect("first page text present");
        let omega = text.find("Omega").expect("last page text present");
        assert!(alpha < omega, "pages out of order: {text:?}");
    }

    #[test]
    fn test_invalid_pdf_is_an_error() {
        assert!(matches!(
            extract_pdf_text(b"definitely not a pdf"),
            Err(ExtractionError::PdfParsing(_))
        ));
    }
}
