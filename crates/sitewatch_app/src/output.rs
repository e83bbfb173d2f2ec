use serde::Serialize;
use sitewatch_core::MonitoredSite;
use sitewatch_engine::{
    AddSiteResponse, CheckSummary, ManualCheckResponse, RemoveSiteResponse, SingleCheckResponse,
};

/// Renders handler responses either as JSON or as short text lines.
pub struct Printer {
    pub json: bool,
}

impl Printer {
    fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn added(&self, response: &AddSiteResponse) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(response);
        }
        match (&response.id, &response.error) {
            (Some(id), _) => println!("Added site {id}"),
            (None, Some(error)) => println!("Could not add site: {error}"),
            (None, None) => println!("Could not add site"),
        }
        Ok(())
    }

    pub fn removed(&self, response: &RemoveSiteResponse) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(response);
        }
        match &response.error {
            None => println!("Site removed"),
            Some(error) => println!("Could not remove site: {error}"),
        }
        Ok(())
    }

    pub fn batch(&self, response: &ManualCheckResponse) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(response);
        }
        if let Some(error) = &response.error {
            println!("Check failed: {error}");
        }
        for row in &response.results {
            println!("{}", summary_line(row));
        }
        Ok(())
    }

    pub fn single(&self, response: &SingleCheckResponse) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(response);
        }
        if let Some(row) = &response.result {
            println!("{}", summary_line(row));
        }
        if let Some(error) = &response.error {
            println!("Check failed: {error}");
        }
        Ok(())
    }

    pub fn sites(&self, sites: &[MonitoredSite]) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(&sites);
        }
        if sites.is_empty() {
            println!("No sites registered");
        }
        for site in sites {
            let checked = site
                .last_checked_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "{}  {:<16} {}  (checked: {})",
                site.id,
                site.status.as_str(),
                site.name,
                checked
            );
            println!("    {}", site.url);
        }
        Ok(())
    }
}

fn summary_line(row: &CheckSummary) -> String {
    match &row.error {
        Some(error) => format!("{:<16} {}  ({})", row.status.as_str(), row.name, error),
        None => format!("{:<16} {}", row.status.as_str(), row.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewatch_core::SiteStatus;

    #[test]
    fn summary_line_includes_error_reason() {
        let row = CheckSummary {
            id: "a".into(),
            name: "Broker".into(),
            status: SiteStatus::Error,
            error: Some("timeout: operation timed out".into()),
        };
        let line = summary_line(&row);
        assert!(line.starts_with("error "));
        assert!(line.ends_with("(timeout: operation timed out)"));
    }
}
