//! HTML rendering for the registry page.
//!
//! The page is a single document with four sections (Add, View, Delete, Download). Each
//! action re-renders the whole page with its outcome shown in the matching section.

use api_shared::{Notice, NoticeKind};
use mtrh_core::{Age, Gender, PatientRecord};

/// Section of the page an outcome belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Add,
    View,
    Delete,
    Export,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Add, Tab::View, Tab::Delete, Tab::Export];

    fn anchor(self) -> &'static str {
        match self {
            Tab::Add => "add",
            Tab::View => "view",
            Tab::Delete => "delete",
            Tab::Export => "export",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Add => "➕ Add Patient",
            Tab::View => "🔍 View Patient",
            Tab::Delete => "❌ Delete Patient",
            Tab::Export => "⬇️ Download Data",
        }
    }
}

/// What to show on a rendered page.
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub tab: Tab,
    pub notice: Option<Notice>,
    pub record: Option<&'a PatientRecord>,
}

impl<'a> Page<'a> {
    pub fn with_notice(tab: Tab, notice: Notice) -> Self {
        Self {
            tab,
            notice: Some(notice),
            record: None,
        }
    }
}

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
nav a{margin-right:1rem}section{border-top:1px solid #ccc;padding:1rem 0}\
section.active{background:#f7f9fc}label{display:block;margin:.5rem 0}\
.notice{padding:.5rem 1rem;border-radius:4px}.success{background:#e3f6e8}\
.warning{background:#fff4d6}.error{background:#fde2e1}dl{display:grid;grid-template-columns:max-content auto;gap:.25rem 1rem}";

/// Render the full page.
pub fn render_page(clinics: &[String], page: &Page<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>MTRH Healthcare System</title>");
    html.push_str(&format!("<style>{STYLE}</style></head><body>"));
    html.push_str("<h1>🏥 MTRH Healthcare System</h1><nav>");
    for tab in Tab::ALL {
        html.push_str(&format!(
            "<a href=\"#{}\">{}</a>",
            tab.anchor(),
            tab.label()
        ));
    }
    html.push_str("</nav>");

    for tab in Tab::ALL {
        let class = if tab == page.tab { " class=\"active\"" } else { "" };
        html.push_str(&format!("<section id=\"{}\"{class}>", tab.anchor()));
        match tab {
            Tab::Add => render_add_section(&mut html, clinics),
            Tab::View => render_view_section(&mut html),
            Tab::Delete => render_delete_section(&mut html),
            Tab::Export => render_export_section(&mut html),
        }
        if tab == page.tab {
            if let Some(notice) = &page.notice {
                render_notice(&mut html, notice);
            }
            if let Some(record) = page.record {
                render_summary(&mut html, record);
            }
        }
        html.push_str("</section>");
    }

    html.push_str("</body></html>");
    html
}

fn render_add_section(html: &mut String, clinics: &[String]) {
    html.push_str("<h2>Register New Patient</h2>");
    html.push_str("<form method=\"post\" action=\"/patients\">");
    html.push_str(
        "<label>Patient ID <input type=\"text\" name=\"patient_id\"></label>\
         <label>Diagnosis <input type=\"text\" name=\"diagnosis\"></label>",
    );

    html.push_str("<label>Healthcare Service Unit <select name=\"healthcare_service_unit\">");
    for clinic in clinics {
        let clinic = escape_html(clinic);
        html.push_str(&format!("<option value=\"{clinic}\">{clinic}</option>"));
    }
    html.push_str("</select></label>");

    html.push_str("<label>Mobile Number <input type=\"text\" name=\"mobile_number\"></label>");

    html.push_str("<label>Gender <select name=\"gender\">");
    for gender in Gender::ALL {
        html.push_str(&format!("<option value=\"{gender}\">{gender}</option>"));
    }
    html.push_str("</select></label>");

    html.push_str(&format!(
        "<label>Age <input type=\"number\" name=\"age\" min=\"{}\" max=\"{}\" step=\"1\"></label>",
        Age::MIN,
        Age::MAX
    ));
    html.push_str("<button type=\"submit\">Submit</button></form>");
}

fn render_view_section(html: &mut String) {
    html.push_str(
        "<h2>View Patient Record</h2>\
         <form method=\"get\" action=\"/patients/view\">\
         <label>Enter Patient ID to Search <input type=\"text\" name=\"patient_id\"></label>\
         <button type=\"submit\">Search</button></form>",
    );
}

fn render_delete_section(html: &mut String) {
    html.push_str(
        "<h2>Delete Patient Record</h2>\
         <form method=\"post\" action=\"/patients/delete\">\
         <label>Enter Patient ID to Delete <input type=\"text\" name=\"patient_id\"></label>\
         <button type=\"submit\">Delete</button></form>",
    );
}

fn render_export_section(html: &mut String) {
    html.push_str(
        "<h2>Download All Patient Data</h2>\
         <form method=\"get\" action=\"/export\">\
         <button type=\"submit\">Download as CSV</button></form>",
    );
}

fn render_notice(html: &mut String, notice: &Notice) {
    let icon = match notice.kind {
        NoticeKind::Success => "✅ ",
        NoticeKind::Warning => "",
        NoticeKind::Error => "❌ ",
    };
    html.push_str(&format!(
        "<p class=\"notice {}\" role=\"status\">{icon}{}</p>",
        notice.kind.as_str(),
        escape_html(&notice.message)
    ));
}

fn render_summary(html: &mut String, record: &PatientRecord) {
    html.push_str("<dl class=\"summary\">");
    for (label, value) in record.summary_fields() {
        html.push_str(&format!(
            "<dt>{label}</dt><dd>{}</dd>",
            escape_html(&value)
        ));
    }
    html.push_str("</dl>");
}

/// Escape text for use in HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtrh_core::ClinicCatalogue;

    fn clinics() -> Vec<String> {
        ClinicCatalogue::mtrh_default().names().to_vec()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_lists_every_clinic_and_gender() {
        let html = render_page(&clinics(), &Page::default());
        assert!(html.contains("Register New Patient"));
        assert!(html.contains("Dental- OMFS- Oral &amp; Maxillofacial Clinic - MTRH"));
        for gender in Gender::ALL {
            assert!(html.contains(&format!("<option value=\"{gender}\">")));
        }
    }

    #[test]
    fn test_notice_is_rendered_in_its_section_only() {
        let page = Page::with_notice(Tab::Export, Notice::warning("No records found to download."));
        let html = render_page(&clinics(), &page);

        let export_start = html.find("<section id=\"export\"").expect("export section");
        let notice_at = html.find("No records found").expect("notice rendered");
        assert!(notice_at > export_start);
        assert!(html.contains("<section id=\"export\" class=\"active\">"));
    }

    #[test]
    fn test_summary_escapes_stored_values() {
        let record = PatientRecord {
            id: 3,
            creation_date: "2024-01-01 00:00:00".into(),
            diagnosis_date: "2024-01-01 00:00:00".into(),
            diagnosis: "<script>alert(1)</script>".into(),
            healthcare_service_unit: "ENT - General - MTRH".into(),
            patient_id: "P3".into(),
            mobile_number: "0700".into(),
            gender: "Other".into(),
            age: 0,
        };
        let page = Page {
            tab: Tab::View,
            notice: None,
            record: Some(&record),
        };
        let html = render_page(&clinics(), &page);
        assert!(html.contains("<dt>Diagnosis</dt><dd>&lt;script&gt;alert(1)&lt;/script&gt;</dd>"));
        assert!(!html.contains("<script>"));
    }
}
