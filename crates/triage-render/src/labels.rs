//! Localized UI labels.
//!
//! Labels are looked up by stable key and language, never by matching text
//! already on screen.

use triage_contracts::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiLabel {
    Title,
    Disclaimer,
    TriageForm,
    PatientName,
    Age,
    Sex,
    Symptoms,
    Duration,
    LocationHint,
    Vitals,
    RunTriage,
    Status,
    Result,
    Severity,
    Priority,
    Specialties,
    CommunityPlan,
    Report,
    Ledger,
    History,
    DownloadPdf,
}

impl UiLabel {
    pub const ALL: [UiLabel; 21] = [
        UiLabel::Title,
        UiLabel::Disclaimer,
        UiLabel::TriageForm,
        UiLabel::PatientName,
        UiLabel::Age,
        UiLabel::Sex,
        UiLabel::Symptoms,
        UiLabel::Duration,
        UiLabel::LocationHint,
        UiLabel::Vitals,
        UiLabel::RunTriage,
        UiLabel::Status,
        UiLabel::Result,
        UiLabel::Severity,
        UiLabel::Priority,
        UiLabel::Specialties,
        UiLabel::CommunityPlan,
        UiLabel::Report,
        UiLabel::Ledger,
        UiLabel::History,
        UiLabel::DownloadPdf,
    ];

    /// Stable key, as used in translation tables.
    pub fn key(self) -> &'static str {
        match self {
            UiLabel::Title => "title",
            UiLabel::Disclaimer => "disclaimer",
            UiLabel::TriageForm => "triageForm",
            UiLabel::PatientName => "patientName",
            UiLabel::Age => "age",
            UiLabel::Sex => "sex",
            UiLabel::Symptoms => "symptoms",
            UiLabel::Duration => "duration",
            UiLabel::LocationHint => "locationHint",
            UiLabel::Vitals => "vitals",
            UiLabel::RunTriage => "runTriage",
            UiLabel::Status => "status",
            UiLabel::Result => "result",
            UiLabel::Severity => "severity",
            UiLabel::Priority => "priority",
            UiLabel::Specialties => "specialties",
            UiLabel::CommunityPlan => "communityPlan",
            UiLabel::Report => "report",
            UiLabel::Ledger => "ledger",
            UiLabel::History => "history",
            UiLabel::DownloadPdf => "downloadPDF",
        }
    }
}

/// The text of `label` in `language`.
pub fn label(language: Language, label: UiLabel) -> &'static str {
    match language {
        Language::En => english(label),
        Language::Hi => hindi(label),
        Language::Kn => kannada(label),
    }
}

fn english(label: UiLabel) -> &'static str {
    match label {
        UiLabel::Title => "Multi-Agent Emergency Healthcare Triage",
        UiLabel::Disclaimer => "Demo only. Not a medical diagnosis or treatment. If you feel unsafe or in danger, seek emergency care immediately.",
        UiLabel::TriageForm => "Triage form",
        UiLabel::PatientName => "Patient Name",
        UiLabel::Age => "Age",
        UiLabel::Sex => "Sex",
        UiLabel::Symptoms => "Symptoms (comma or newline separated)",
        UiLabel::Duration => "Symptom duration (hours)",
        UiLabel::LocationHint => "Location hint",
        UiLabel::Vitals => "Vitals",
        UiLabel::RunTriage => "Run triage",
        UiLabel::Status => "Status",
        UiLabel::Result => "Triage result",
        UiLabel::Severity => "Severity band",
        UiLabel::Priority => "Priority",
        UiLabel::Specialties => "Suggested specialties",
        UiLabel::CommunityPlan => "Community plan",
        UiLabel::Report => "Auto-generated report",
        UiLabel::Ledger => "Agent ledger (explainability)",
        UiLabel::History => "Case History",
        UiLabel::DownloadPdf => "Download PDF",
    }
}

fn hindi(label: UiLabel) -> &'static str {
    match label {
        UiLabel::Title => "मल्टी-एजेंट आपातकालीन स्वास्थ्य ट्रायज",
        UiLabel::Disclaimer => "केवल डेमो। यह कोई चिकित्सा निदान या उपचार नहीं है। यदि आप असुरक्षित या खतरे में महसूस करते हैं, तो तुरंत आपातकालीन देखभाल लें।",
        UiLabel::TriageForm => "ट्रायज फॉर्म",
        UiLabel::PatientName => "रोगी का नाम",
        UiLabel::Age => "आयु",
        UiLabel::Sex => "लिंग",
        UiLabel::Symptoms => "लक्षण (कॉमा या नई पंक्ति से अलग करें)",
        UiLabel::Duration => "लक्षणों की अवधि (घंटे)",
        UiLabel::LocationHint => "स्थान",
        UiLabel::Vitals => "महत्वपूर्ण संकेत (वैकल्पिक)",
        UiLabel::RunTriage => "ट्रायज चलाएँ",
        UiLabel::Status => "स्थिति",
        UiLabel::Result => "ट्रायज परिणाम",
        UiLabel::Severity => "गंभीरता",
        UiLabel::Priority => "प्राथमिकता",
        UiLabel::Specialties => "सुझाई गई विशेषज्ञताएँ",
        UiLabel::CommunityPlan => "सामुदायिक योजना",
        UiLabel::Report => "स्वतः-जनित रिपोर्ट",
        UiLabel::Ledger => "एजेंट लेजर (व्याख्यात्मकता)",
        UiLabel::History => "मामलों का इतिहास",
        UiLabel::DownloadPdf => "पीडीएफ डाउनलोड करें",
    }
}

fn kannada(label: UiLabel) -> &'static str {
    match label {
        UiLabel::Title => "ಬಹು-ಏಜೆಂಟ್ ತುರ್ತು ಆರೋಗ್ಯ ತ್ರೈಯಾಜ್",
        UiLabel::Disclaimer => "ಡೆಮೊ ಮಾತ್ರ. ಇದು ವೈದ್ಯಕೀಯ ನಿರ್ಧಾರ ಅಥವಾ ಚಿಕಿತ್ಸೆ ಅಲ್ಲ. ನೀವು ಅಪಾಯದಲ್ಲಿದ್ದರೆ ಅಥವಾ ಭಯಗೊಂಡಿದ್ದರೆ ತಕ್ಷಣ ತುರ್ತು ಸೇವೆಯನ್ನು ಸಂಪರ್ಕಿಸಿ.",
        UiLabel::TriageForm => "ತ್ರೈಯಾಜ್ ಫಾರ್ಮ್",
        UiLabel::PatientName => "ರೋಗಿಯ ಹೆಸರು",
        UiLabel::Age => "ವಯಸ್ಸು",
        UiLabel::Sex => "ಲಿಂಗ",
        UiLabel::Symptoms => "ಲಕ್ಷಣಗಳು (ಅಲ್ಪವಿರಾಮ ಅಥವಾ ಹೊಸ ಸಾಲು ಬಳಸಿ)",
        UiLabel::Duration => "ಲಕ್ಷಣಗಳ ಅವಧಿ (ಗಂಟೆ)",
        UiLabel::LocationHint => "ಸ್ಥಳ",
        UiLabel::Vitals => "ಪ್ರಮುಖ ಸೂಚನೆಗಳು (ಐಚ್ಛಿಕ)",
        UiLabel::RunTriage => "ತ್ರೈಯಾಜ್ ಚಾಲನೆ ಮಾಡಿ",
        UiLabel::Status => "ಸ್ಥಿತಿ",
        UiLabel::Result => "ತ್ರೈಯಾಜ್ ಫಲಿತಾಂಶ",
        UiLabel::Severity => "ತೀವ್ರತೆ",
        UiLabel::Priority => "ಪ್ರಾಮುಖ್ಯತೆ",
        UiLabel::Specialties => "ಸೂಚಿಸಲಾದ ಪರಿಣತಿಗಳು",
        UiLabel::CommunityPlan => "ಸಮುದಾಯ ಯೋಜನೆ",
        UiLabel::Report => "ಸ್ವಯಂ-ಉತ್ಪಾದಿತ ವರದಿ",
        UiLabel::Ledger => "ಏಜೆಂಟ್ ಲೆಡ್ಜರ್ (ವಿವರಣೆ)",
        UiLabel::History => "ಕೇಸ್ ಇತಿಹಾಸ",
        UiLabel::DownloadPdf => "ಪಿಡಿಎಫ್ ಡೌನ್‌ಲೋಡ್ ಮಾಡಿ",
    }
}
