use crate::validate::ValidationError;
use crate::RequestId;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to send message";

const TIMEOUT_MESSAGE: &str = "Request timed out. Please check your connection and try again.";
const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
const PROTOCOL_MESSAGE: &str = "Server returned invalid response format";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Company,
    ProjectType,
    Budget,
    Subject,
    Message,
    /// Honeypot; humans leave it empty.
    Website,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Company,
        FormField::ProjectType,
        FormField::Budget,
        FormField::Subject,
        FormField::Message,
        FormField::Website,
    ];

    pub const REQUIRED: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    /// Wire name of the field in the JSON payload.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Company => "company",
            FormField::ProjectType => "project_type",
            FormField::Budget => "budget",
            FormField::Subject => "subject",
            FormField::Message => "message",
            FormField::Website => "website",
        }
    }

    /// Free-text fields are trimmed when a submission is collected; the
    /// select-style fields and the honeypot are carried as-is.
    fn is_trimmed(self) -> bool {
        !matches!(
            self,
            FormField::ProjectType | FormField::Budget | FormField::Website
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_type: String,
    pub budget: String,
    pub subject: String,
    pub message: String,
    pub website: String,
}

impl ContactMessage {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Company => &self.company,
            FormField::ProjectType => &self.project_type,
            FormField::Budget => &self.budget,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
            FormField::Website => &self.website,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Company => &mut self.company,
            FormField::ProjectType => &mut self.project_type,
            FormField::Budget => &mut self.budget,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
            FormField::Website => &mut self.website,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// The rendered form's current field values plus the in-flight marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ContactForm {
    fields: ContactMessage,
    in_flight: Option<RequestId>,
    last_result: Option<SubmissionResult>,
}

impl ContactForm {
    pub(crate) fn fields(&self) -> &ContactMessage {
        &self.fields
    }

    pub(crate) fn set_field(&mut self, field: FormField, value: String) -> bool {
        if self.fields.get(field) == value {
            return false;
        }
        self.fields.set(field, value);
        true
    }

    /// Snapshot of the current values, normalised for submission.
    pub(crate) fn collect(&self) -> ContactMessage {
        let mut collected = ContactMessage::default();
        for field in FormField::ALL {
            let raw = self.fields.get(field);
            let value = if field.is_trimmed() { raw.trim() } else { raw };
            collected.set(field, value.to_string());
        }
        collected
    }

    pub(crate) fn clear(&mut self) {
        self.fields = ContactMessage::default();
    }

    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        self.in_flight = Some(request_id);
    }

    /// Marks the submission settled. Returns false for a stale request id.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub(crate) fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub(crate) fn record(&mut self, result: SubmissionResult) {
        self.last_result = Some(result);
    }
}

/// Server acknowledgement of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactAccepted {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    Validation(ValidationError),
    Timeout,
    Network,
    /// Reply was not JSON or had the wrong shape.
    Protocol,
    /// Well-formed JSON reply that reported failure.
    Application { detail: Option<String> },
    Unexpected,
}

impl SubmitFailure {
    pub fn user_message(&self) -> String {
        match self {
            SubmitFailure::Validation(err) => err.to_string(),
            SubmitFailure::Timeout => TIMEOUT_MESSAGE.to_string(),
            SubmitFailure::Network => NETWORK_MESSAGE.to_string(),
            SubmitFailure::Protocol => PROTOCOL_MESSAGE.to_string(),
            SubmitFailure::Application { detail } => detail
                .as_deref()
                .map(str::trim)
                .filter(|detail| !detail.is_empty())
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                .to_string(),
            SubmitFailure::Unexpected => UNEXPECTED_MESSAGE.to_string(),
        }
    }
}

pub type ContactOutcome = Result<ContactAccepted, SubmitFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Sent { message: String },
    Failed(SubmitFailure),
}

impl SubmissionResult {
    pub fn from_outcome(outcome: ContactOutcome) -> Self {
        match outcome {
            Ok(accepted) => SubmissionResult::Sent {
                message: accepted
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            },
            Err(failure) => SubmissionResult::Failed(failure),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SubmissionResult::Sent { .. })
    }

    /// Text shown in the status notifier.
    pub fn display_text(&self) -> String {
        match self {
            SubmissionResult::Sent { message } => message.clone(),
            SubmissionResult::Failed(failure) => failure.user_message(),
        }
    }
}
