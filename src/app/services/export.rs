use crate::app::domain::layout::PageSettings;

use super::text_ops::strip_tags;

/// A materialized export: bytes plus the MIME type and filename the
/// download collaborator needs. Formats are best-effort wrappers, not
/// byte-exact encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: &'static str,
}

/// Visible text only, markup stripped.
pub fn plain_text(content: &str) -> ExportArtifact {
    ExportArtifact {
        bytes: strip_tags(content).into_bytes(),
        mime_type: "text/plain",
        filename: "documento.txt",
    }
}

/// Legacy word-processor HTML wrapper around the raw content.
pub fn word_document(content: &str) -> ExportArtifact {
    let header = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' \
xmlns='http://www.w3.org/TR/REC-html40'>\
<head><meta charset='utf-8'><title>Export DOC</title></head><body>";
    let footer = "</body></html>";
    ExportArtifact {
        bytes: format!("{}{}{}", header, content, footer).into_bytes(),
        mime_type: "application/msword",
        filename: "documento.doc",
    }
}

/// Minimal standalone HTML document with the layout settings embedded
/// as inline styling.
pub fn html_document(settings: &PageSettings, content: &str) -> ExportArtifact {
    let size = settings.paper_size();
    let page_style = format!(
        "width: {}mm; min-height: {}mm; margin: 0 auto; \
padding: {}mm {}mm {}mm {}mm; \
font-family: {}; font-size: {}pt; line-height: {}; text-align: justify;",
        size.width_mm,
        size.height_mm,
        settings.margins.top,
        settings.margins.right,
        settings.margins.bottom,
        settings.margins.left,
        settings.font_family.css_value(),
        settings.font_size_body,
        settings.line_height,
    );

    let mut paragraph_rules = format!(
        "margin-bottom: {}px; text-indent: {}mm;",
        settings.paragraph_spacing, settings.first_line_indent,
    );
    if settings.paragraph_border_width > 0 {
        paragraph_rules.push_str(&format!(
            " border: {}px solid {}; padding: {}px;",
            settings.paragraph_border_width,
            settings.paragraph_border_color,
            settings.paragraph_padding,
        ));
    }

    let document = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<title>Documento</title>\n<style>\n\
body {{ background: #f3f4f6; margin: 0; }}\n\
.page {{ {page_style} background: #ffffff; }}\n\
.page p {{ {paragraph_rules} }}\n\
.page h1 {{ font-size: {h1}pt; margin-bottom: {h1_spacing}px; }}\n\
.page h2 {{ font-size: {h2}pt; margin-bottom: {spacing}px; }}\n\
</style>\n</head>\n<body>\n<div class=\"page\">{content}</div>\n</body>\n</html>\n",
        page_style = page_style,
        paragraph_rules = paragraph_rules,
        h1 = settings.font_size_h1,
        h1_spacing = settings.paragraph_spacing * 2,
        h2 = settings.font_size_h2,
        spacing = settings.paragraph_spacing,
        content = content,
    );

    ExportArtifact {
        bytes: document.into_bytes(),
        mime_type: "text/html",
        filename: "documento.html",
    }
}
