//! Fixed scenario suites run by the `license_probe` binary.
//!
//! Scenarios run strictly one after another; a failing scenario is reported
//! as text and never stops the rest of the suite.

use crate::client::check::LicenseCheckClient;
use crate::client::outcome::{OutcomeKind, ValidationOutcome};
use crate::config::{CredentialsConfig, EndpointsConfig};

/// Which configured endpoint a scenario targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Local,
    Deployed,
}

impl Target {
    pub fn url<'a>(&self, endpoints: &'a EndpointsConfig) -> &'a str {
        match self {
            Target::Local => &endpoints.local_url,
            Target::Deployed => &endpoints.deployed_url,
        }
    }
}

/// A single predefined license check and the outcome it should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub target: Target,
    pub client_id: Option<String>,
    pub license_key: String,
    pub expected: OutcomeKind,
}

impl Scenario {
    fn new(
        id: &'static str,
        title: &'static str,
        target: Target,
        client_id: Option<&str>,
        license_key: &str,
        expected: OutcomeKind,
    ) -> Self {
        Self {
            id,
            title,
            target,
            client_id: client_id.map(str::to_string),
            license_key: license_key.to_string(),
            expected,
        }
    }
}

/// What a scenario actually produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub id: &'static str,
    pub title: &'static str,
    pub expected: OutcomeKind,
    pub outcome: ValidationOutcome,
}

impl ScenarioReport {
    pub fn matched(&self) -> bool {
        self.outcome.kind() == self.expected
    }
}

/// Suite A: checks against the local development server.
pub fn local_suite(credentials: &CredentialsConfig) -> Vec<Scenario> {
    vec![
        Scenario::new(
            "A.1",
            "Valid License",
            Target::Local,
            Some(&credentials.valid_client_id),
            &credentials.valid_license_key,
            OutcomeKind::Valid,
        ),
        Scenario::new(
            "A.2",
            "Invalid Key/Expired Subscription",
            Target::Local,
            Some(&credentials.valid_client_id),
            &credentials.invalid_license_key,
            OutcomeKind::Invalid,
        ),
        Scenario::new(
            "A.3",
            "Invalid Client ID",
            Target::Local,
            Some(&credentials.invalid_client_id),
            &credentials.valid_license_key,
            OutcomeKind::Invalid,
        ),
        Scenario::new(
            "A.4",
            "Missing Client ID Parameter (Bad Request)",
            Target::Local,
            None,
            &credentials.valid_license_key,
            OutcomeKind::BadRequest,
        ),
        Scenario::new(
            "A.5",
            "Empty License Key (Bad Request)",
            Target::Local,
            Some(&credentials.valid_client_id),
            "",
            OutcomeKind::BadRequest,
        ),
    ]
}

/// Suite B: checks against the deployed server.
pub fn deployed_suite(credentials: &CredentialsConfig) -> Vec<Scenario> {
    vec![Scenario::new(
        "B.1",
        "Valid License on Deployment",
        Target::Deployed,
        Some(&credentials.valid_client_id),
        &credentials.valid_license_key,
        OutcomeKind::Valid,
    )]
}

fn print_banner(title: &str) {
    let line = "#".repeat(title.len() + 6);
    println!("\n\n{line}");
    println!("## {title} ##");
    println!("{line}");
}

/// Run `scenarios` in order under a banner and collect their reports.
pub async fn run_suite(
    client: &LicenseCheckClient,
    endpoints: &EndpointsConfig,
    title: &str,
    scenarios: &[Scenario],
) -> Vec<ScenarioReport> {
    print_banner(title);

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        println!("\n--- TEST {}: {} ---", scenario.id, scenario.title);

        let outcome = client
            .check_license(
                scenario.target.url(endpoints),
                scenario.client_id.as_deref(),
                &scenario.license_key,
            )
            .await;

        reports.push(ScenarioReport {
            id: scenario.id,
            title: scenario.title,
            expected: scenario.expected,
            outcome,
        });
    }

    reports
}

/// Print one line per report plus a tally. Returns the number of matches.
pub fn print_summary(reports: &[ScenarioReport]) -> usize {
    println!("\n\n--- SUMMARY ---");

    let mut matched = 0;
    for report in reports {
        let mark = if report.matched() {
            matched += 1;
            "ok"
        } else {
            "MISMATCH"
        };
        println!(
            "[{mark}] {} {}: expected {}, got {}",
            report.id,
            report.title,
            report.expected,
            report.outcome.kind()
        );
    }

    println!(
        "[SUMMARY] {matched}/{} scenarios matched expectations.",
        reports.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_suite_covers_fixed_cases() {
        let creds = CredentialsConfig::default();
        let suite = local_suite(&creds);

        assert_eq!(suite.len(), 5);
        assert!(suite.iter().all(|s| s.target == Target::Local));

        let missing = suite.iter().find(|s| s.id == "A.4").unwrap();
        assert!(missing.client_id.is_none());
        assert_eq!(missing.expected, OutcomeKind::BadRequest);

        let bad_client = suite.iter().find(|s| s.id == "A.3").unwrap();
        assert_eq!(bad_client.client_id.as_deref(), Some("CLIENT_Z999"));
        assert_eq!(bad_client.license_key, "NEW_TEST_KEY_123");
    }

    #[test]
    fn deployed_suite_targets_deployed_url() {
        let endpoints = EndpointsConfig::default();
        let suite = deployed_suite(&CredentialsConfig::default());

        assert_eq!(suite.len(), 1);
        assert_eq!(
            suite[0].target.url(&endpoints),
            "https://your-domain.vercel.app/api"
        );
    }

    #[test]
    fn summary_counts_matches() {
        let reports = vec![
            ScenarioReport {
                id: "A.1",
                title: "Valid License",
                expected: OutcomeKind::Valid,
                outcome: ValidationOutcome::Valid,
            },
            ScenarioReport {
                id: "B.1",
                title: "Valid License on Deployment",
                expected: OutcomeKind::Valid,
                outcome: ValidationOutcome::NetworkError("dns failure".into()),
            },
        ];

        assert!(reports[0].matched());
        assert!(!reports[1].matched());
        assert_eq!(print_summary(&reports), 1);
    }
}
