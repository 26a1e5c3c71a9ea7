//! The six object kinds nested under a firewall policy.

use crate::oci::template::{self, CommandTemplate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SecurityRule,
    AddressList,
    Service,
    ServiceList,
    Application,
    ApplicationGroup,
}

impl Category {
    /// Order in which listings are fetched.
    pub const LISTING_ORDER: [Category; 6] = [
        Category::SecurityRule,
        Category::AddressList,
        Category::Service,
        Category::ServiceList,
        Category::Application,
        Category::ApplicationGroup,
    ];

    /// Order in which listings are hydrated.
    pub const HYDRATION_ORDER: [Category; 6] = [
        Category::SecurityRule,
        Category::AddressList,
        Category::ServiceList,
        Category::Service,
        Category::Application,
        Category::ApplicationGroup,
    ];

    /// Resource name used by `oci network-firewall <resource>`.
    pub fn resource(self) -> &'static str {
        match self {
            Category::SecurityRule => "security-rule",
            Category::AddressList => "address-list",
            Category::Service => "service",
            Category::ServiceList => "service-list",
            Category::Application => "application",
            Category::ApplicationGroup => "application-group",
        }
    }

    /// Listing file written by the list phase. The converter reads these names.
    pub fn listing_file(self) -> &'static str {
        match self {
            Category::SecurityRule => "security_rule.json",
            Category::AddressList => "addresslist.json",
            Category::Service => "service.json",
            Category::ServiceList => "servicelist.json",
            Category::Application => "application.json",
            Category::ApplicationGroup => "applicationlist.json",
        }
    }

    pub fn output_file(self) -> &'static str {
        match self {
            Category::SecurityRule => "security_rule_output.json",
            Category::AddressList => "addresslist_output.json",
            Category::Service => "service_output.json",
            Category::ServiceList => "servicelist_output.json",
            Category::Application => "application_output.json",
            Category::ApplicationGroup => "applicationlist_output.json",
        }
    }

    /// `network-firewall <resource> list --network-firewall-policy-id {policy_id} --all`
    pub fn list_template(self) -> CommandTemplate {
        CommandTemplate::new([
            "network-firewall",
            self.resource(),
            "list",
            "--network-firewall-policy-id",
            template::POLICY_ID,
            "--all",
        ])
    }

    /// `network-firewall <resource> get --network-firewall-policy-id {parent_resource_id} --<resource>-name {name}`
    pub fn detail_template(self) -> CommandTemplate {
        CommandTemplate::new([
            "network-firewall".to_string(),
            self.resource().to_string(),
            "get".to_string(),
            "--network-firewall-policy-id".to_string(),
            template::PARENT_RESOURCE_ID.to_string(),
            format!("--{}-name", self.resource()),
            template::NAME.to_string(),
        ])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::SecurityRule => "security rules",
            Category::AddressList => "address lists",
            Category::Service => "services",
            Category::ServiceList => "service lists",
            Category::Application => "applications",
            Category::ApplicationGroup => "application groups",
        };
        f.write_str(label)
    }
}
