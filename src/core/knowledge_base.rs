//! This module holds the built-in, read-only catalog of the assessment:
//! the reference questionnaire, the what-if scenarios for each severity tier,
//! the reference risk factors and a sample of vulnerabilities and remediation tasks.
//! Keeping this data-driven lets hosts swap any part of it for their own
//! configuration without touching the engines.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::action_plan::{ActionItem, Priority};
use crate::core::models::{CategoryScore, Question, ScenarioStep, Severity, Stage, Vulnerability};

/// A question of the reference questionnaire.
pub struct QuestionDetail {
    /// Machine-readable id, also the key of the answer map (e.g. "mfa_enabled").
    pub id: &'static str,
    /// The question shown to the user.
    pub prompt: &'static str,
    /// Allowed answers, in display order.
    pub options: &'static [&'static str],
}

/// A stage of the reference questionnaire.
pub struct StageDetail {
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [QuestionDetail],
}

/// One narrative step of a built-in scenario.
pub struct ScenarioStepDetail {
    pub title: &'static str,
    pub description: &'static str,
    /// Icon hint for the presentation layer (e.g. "shield-alert", "dollar-sign").
    pub icon: &'static str,
    /// Colour hint for the presentation layer.
    pub color: &'static str,
}

impl ScenarioStepDetail {
    pub fn to_step(&self) -> ScenarioStep {
        ScenarioStep::new(self.title, self.description, self.icon, self.color)
    }
}

/// The reference questionnaire: five stages, eleven questions.
static STAGES: &[StageDetail] = &[
    // --- Stage 1: Basic hygiene ---
    StageDetail {
        title: "Basic Security",
        description: "Passwords, MFA, and backup practices",
        questions: &[
            QuestionDetail {
                id: "password_policy",
                prompt: "Do you have a written password policy requiring strong passwords?",
                options: &["Yes, enforced", "Yes, but not enforced", "No policy"],
            },
            QuestionDetail {
                id: "mfa_enabled",
                prompt: "Is multi-factor authentication (MFA) enabled for admin accounts?",
                options: &["Yes, all admins", "Yes, some admins", "No MFA"],
            },
            QuestionDetail {
                id: "backup_frequency",
                prompt: "How often do you backup critical business data?",
                options: &["Daily", "Weekly", "Monthly", "Rarely/Never"],
            },
        ],
    },
    // --- Stage 2: Who can do what ---
    StageDetail {
        title: "Access Controls",
        description: "Admin accounts and user permissions",
        questions: &[
            QuestionDetail {
                id: "admin_accounts",
                prompt: "How many people have administrator access to your systems?",
                options: &["1-2 people", "3-5 people", "6-10 people", "More than 10"],
            },
            QuestionDetail {
                id: "access_review",
                prompt: "How often do you review user access permissions?",
                options: &["Monthly", "Quarterly", "Annually", "Never"],
            },
        ],
    },
    // --- Stage 3: Devices ---
    StageDetail {
        title: "Endpoint Security",
        description: "Antivirus and system updates",
        questions: &[
            QuestionDetail {
                id: "antivirus",
                prompt: "Do all computers have up-to-date antivirus software?",
                options: &["Yes, centrally managed", "Yes, individually managed", "Some computers", "No antivirus"],
            },
            QuestionDetail {
                id: "updates",
                prompt: "How do you handle security updates?",
                options: &["Automatic updates", "Manual monthly", "Manual quarterly", "Ad-hoc basis"],
            },
        ],
    },
    // --- Stage 4: Perimeter ---
    StageDetail {
        title: "Network Security",
        description: "Firewall and VPN configuration",
        questions: &[
            QuestionDetail {
                id: "firewall",
                prompt: "Do you have a firewall protecting your network?",
                options: &["Yes, enterprise firewall", "Yes, basic router firewall", "No firewall"],
            },
            QuestionDetail {
                id: "remote_access",
                prompt: "How do remote workers access company systems?",
                options: &["VPN required", "Cloud-based access", "Direct internet access", "No remote access"],
            },
        ],
    },
    // --- Stage 5: People and process ---
    StageDetail {
        title: "Policies & Training",
        description: "Security awareness and documentation",
        questions: &[
            QuestionDetail {
                id: "security_training",
                prompt: "Do employees receive cybersecurity awareness training?",
                options: &["Regular training", "Annual training", "One-time training", "No training"],
            },
            QuestionDetail {
                id: "incident_plan",
                prompt: "Do you have a written incident response plan?",
                options: &["Yes, tested regularly", "Yes, but not tested", "Basic plan", "No plan"],
            },
        ],
    },
];

static CRITICAL_STEPS: &[ScenarioStepDetail] = &[
    ScenarioStepDetail { title: "Exploitation", description: "Attacker uses automated tools to exploit the vulnerability.", icon: "shield-alert", color: "red" },
    ScenarioStepDetail { title: "Access Gained", description: "Unauthorized admin access to the database obtained.", icon: "activity", color: "orange" },
    ScenarioStepDetail { title: "Data Exfiltration", description: "Customer data (emails, passwords) is stolen.", icon: "users", color: "yellow" },
    ScenarioStepDetail { title: "Business Impact", description: "Estimated $50,000 loss in fines and reputation damage.", icon: "dollar-sign", color: "red" },
];

static HIGH_STEPS: &[ScenarioStepDetail] = &[
    ScenarioStepDetail { title: "Initial Breach", description: "Attacker gains low-level entry via exposed service.", icon: "shield-alert", color: "orange" },
    ScenarioStepDetail { title: "Lateral Movement", description: "Attacker scans internal network for sensitive assets.", icon: "activity", color: "yellow" },
    ScenarioStepDetail { title: "Service Disruption", description: "Critical services taken offline for 4 hours.", icon: "activity", color: "orange" },
    ScenarioStepDetail { title: "Operational Loss", description: "Estimated $15,000 in lost productivity and sales.", icon: "dollar-sign", color: "red" },
];

static MEDIUM_STEPS: &[ScenarioStepDetail] = &[
    ScenarioStepDetail { title: "Reconnaissance", description: "Attacker identifies outdated software version.", icon: "shield-alert", color: "yellow" },
    ScenarioStepDetail { title: "Targeted Phishing", description: "Employees targeted based on exposed info.", icon: "users", color: "orange" },
    ScenarioStepDetail { title: "Potential Breach", description: "Risk of credential theft increases by 40%.", icon: "activity", color: "yellow" },
    ScenarioStepDetail { title: "Remediation Cost", description: "Estimated $5,000 for emergency patching and audit.", icon: "dollar-sign", color: "orange" },
];

static SCENARIOS: Lazy<HashMap<Severity, &'static [ScenarioStepDetail]>> = Lazy::new(|| {
    HashMap::from([
        (Severity::Critical, CRITICAL_STEPS),
        (Severity::High, HIGH_STEPS),
        (Severity::Medium, MEDIUM_STEPS),
    ])
});

/// Returns the raw reference stage table.
pub fn stage_details() -> &'static [StageDetail] {
    STAGES
}

/// Builds owned `Stage` values from the reference questionnaire, ready to be
/// validated by `Questionnaire::new`.
pub fn default_stages() -> Vec<Stage> {
    STAGES
        .iter()
        .map(|stage| {
            let questions = stage
                .questions
                .iter()
                .map(|q| Question::new(q.id, q.prompt, q.options))
                .collect();
            Stage::new(stage.title, stage.description, questions)
        })
        .collect()
}

/// Retrieves a question of the reference questionnaire by id.
///
/// # Returns
/// `Some` with the detail if the id exists, `None` otherwise.
pub fn get_question_detail(id: &str) -> Option<&'static QuestionDetail> {
    STAGES.iter().flat_map(|s| s.questions.iter()).find(|q| q.id == id)
}

/// The built-in scenario per severity tier, four steps each.
pub fn default_scenarios() -> &'static HashMap<Severity, &'static [ScenarioStepDetail]> {
    &SCENARIOS
}

/// The reference risk factors used when no category scores are configured.
pub fn reference_risk_factors() -> Vec<CategoryScore> {
    vec![
        CategoryScore::new("Network Security", 45, 25.0)
            .with_issues(&["Expired SSL certificate", "Weak TLS configuration"]),
        CategoryScore::new("Access Management", 70, 20.0)
            .with_issues(&["Missing MFA on some accounts", "Infrequent access reviews"]),
        CategoryScore::new("Endpoint Protection", 85, 20.0)
            .with_issues(&["Some systems need updates"]),
        CategoryScore::new("Data Protection", 60, 15.0)
            .with_issues(&["Backup testing needed", "Encryption gaps"]),
        CategoryScore::new("Security Awareness", 55, 10.0)
            .with_issues(&["Training outdated", "No phishing tests"]),
        CategoryScore::new("Incident Response", 40, 10.0)
            .with_issues(&["No documented plan", "Untested procedures"]),
    ]
}

/// Sample vulnerabilities used by the demo report when none are configured.
pub fn sample_vulnerabilities() -> Vec<Vulnerability> {
    let entries = [
        ("1", "Heartbleed (CVE-2014-0160)", Severity::Critical, "OpenSSL vulnerability allowing memory leak of private keys.", "api.startup.com"),
        ("2", "SQL Injection", Severity::Critical, "Unsanitized input allows execution of arbitrary SQL commands.", "startup.com/login"),
        ("3", "Cross-Site Scripting (XSS)", Severity::High, "Reflected XSS vulnerability in contact form.", "startup.com/contact"),
        ("4", "Weak SSH Credentials", Severity::High, "Default root password detected on SSH service.", "104.21.55.2"),
        ("5", "Outdated PHP Version", Severity::Medium, "Running PHP 7.2 which is end-of-life.", "blog.startup.com"),
    ];
    entries
        .into_iter()
        .map(|(id, title, severity, description, asset)| Vulnerability {
            id: id.to_string(),
            title: title.to_string(),
            severity,
            description: description.to_string(),
            asset: asset.to_string(),
        })
        .collect()
}

/// Starter remediation tasks for a new action plan.
pub fn starter_action_items() -> Vec<ActionItem> {
    vec![
        ActionItem::new(1, "Update OpenSSL on Web Server", Priority::High, "Today", "DevOps Team"),
        ActionItem::new(2, "Configure DMARC Policy", Priority::High, "Tomorrow", "IT Admin"),
        ActionItem::new(3, "Review Firewall Rules", Priority::Medium, "Oct 30", "NetSec"),
        ActionItem::new(4, "Conduct Employee Phishing Training", Priority::Low, "Nov 15", "HR"),
        ActionItem::new(5, "Rotate API Keys", Priority::Medium, "Nov 01", "Lead Dev"),
    ]
}
