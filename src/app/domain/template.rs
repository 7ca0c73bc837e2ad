use super::layout::{
    FontFamily, Margins, NumberPosition, PageNumbering, PageSettings,
};

/// An immutable named pair of layout settings and seed content.
/// Catalog entries are fixed at process start and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub settings: PageSettings,
    pub initial_content: &'static str,
}

impl DocumentTemplate {
    /// Clean minimal layout. This is also the editor's starting state.
    pub fn simple() -> Self {
        Self {
            id: "simple",
            name: "Documento Semplice",
            description: "Layout pulito e minimale. Margini standard 20mm, interlinea 1.15.",
            icon: "fa-align-left",
            settings: PageSettings::default(),
            initial_content:
                "<h1>Titolo Documento</h1><p>Inserisci qui il tuo testo semplice...</p>",
        }
    }

    pub fn professional() -> Self {
        Self {
            id: "professional",
            name: "Documento Professionale",
            description: "Relazione formale istituzionale. Margini 25-30mm, font istituzionale.",
            icon: "fa-briefcase",
            settings: PageSettings {
                margins: Margins { top: 25, bottom: 25, left: 30, right: 20 },
                line_height: 1.3,
                paragraph_spacing: 12,
                font_family: FontFamily::Roboto,
                first_line_indent: 12.0,
                font_size_body: 12,
                font_size_h1: 18,
                font_size_h2: 14,
                page_numbering: PageNumbering {
                    enabled: true,
                    position: NumberPosition::BottomRight,
                    ..PageNumbering::default()
                },
                ..PageSettings::default()
            },
            initial_content: "<h1>Relazione Professionale</h1><h2>Sintesi Esecutiva</h2>\
                <p>Questo layout segue le regole della videoscrittura professionale moderna...</p>",
        }
    }

    pub fn thesis() -> Self {
        Self {
            id: "thesis",
            name: "Documento Tesi",
            description:
                "Standard accademico: margine rilegatura 40mm, interlinea 1.5, numerazione tesi.",
            icon: "fa-graduation-cap",
            settings: PageSettings {
                margins: Margins { top: 30, bottom: 30, left: 40, right: 25 },
                line_height: 1.5,
                paragraph_spacing: 8,
                font_family: FontFamily::Merriweather,
                first_line_indent: 15.0,
                font_size_body: 12,
                font_size_h1: 16,
                font_size_h2: 14,
                page_numbering: PageNumbering {
                    enabled: true,
                    position: NumberPosition::BottomCenter,
                    ..PageNumbering::default()
                },
                ..PageSettings::default()
            },
            initial_content: "<h1 style=\"text-align:center\">TITOLO TESI DI LAUREA</h1>\
                <h2>Introduzione</h2><p>Analisi metodologica e impaginazione accademica...</p>",
        }
    }
}

/// The fixed template catalog, in presentation order.
pub fn predefined_templates() -> Vec<DocumentTemplate> {
    vec![
        DocumentTemplate::simple(),
        DocumentTemplate::professional(),
        DocumentTemplate::thesis(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::layout::{Orientation, PageFormat};

    #[test]
    fn test_catalog_has_three_entries() {
        let templates = predefined_templates();
        assert_eq!(templates.len(), 3);
        let ids: Vec<_> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["simple", "professional", "thesis"]);
    }

    #[test]
    fn test_simple_template_matches_defaults() {
        let simple = DocumentTemplate::simple();
        assert_eq!(simple.settings, PageSettings::default());
        assert_eq!(simple.settings.format, PageFormat::A4);
        assert_eq!(simple.settings.orientation, Orientation::Portrait);
        assert_eq!(simple.settings.margins, Margins::uniform(20));
        assert_eq!(simple.settings.line_height, 1.15);
        assert!(!simple.settings.page_numbering.enabled);
    }

    #[test]
    fn test_thesis_template_settings() {
        let thesis = DocumentTemplate::thesis();
        assert_eq!(thesis.settings.margins.left, 40);
        assert_eq!(thesis.settings.line_height, 1.5);
        assert_eq!(thesis.settings.font_family, FontFamily::Merriweather);
        assert!(thesis.settings.page_numbering.enabled);
        assert_eq!(
            thesis.settings.page_numbering.position,
            NumberPosition::BottomCenter
        );
    }

    #[test]
    fn test_templates_carry_seed_content() {
        for template in predefined_templates() {
            assert!(!template.initial_content.is_empty());
        }
    }
}
