#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatus {
    OnSale,
    OffSale,
    Canceled,
    Postponed,
    Rescheduled,
    /// Any other upstream code, kept verbatim.
    Other(String),
    Unknown,
}

impl TicketStatus {
    pub fn from_code(code: Option<&str>) -> Self {
        let code = match code {
            Some(c) if !c.is_empty() => c,
            _ => return TicketStatus::Unknown,
        };
        match code.to_lowercase().as_str() {
            "onsale" => TicketStatus::OnSale,
            "offsale" => TicketStatus::OffSale,
            "canceled" => TicketStatus::Canceled,
            "postponed" => TicketStatus::Postponed,
            "rescheduled" => TicketStatus::Rescheduled,
            _ => TicketStatus::Other(code.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TicketStatus::OnSale => "On Sale",
            TicketStatus::OffSale => "Off Sale",
            TicketStatus::Canceled => "Canceled",
            TicketStatus::Postponed => "Postponed",
            TicketStatus::Rescheduled => "Rescheduled",
            TicketStatus::Other(code) => code,
            TicketStatus::Unknown => "N/A",
        }
    }
}
