use log::{debug, trace};

use crate::{
    analyzer::route_label,
    config::Config,
    constants::MAIN_SECTION_TITLE,
    types::{LinkEntry, PageRecord, Section, SectionRule, SiteConfig},
};

/// Groups every configured page into sections of links.
///
/// Sections are `Main Pages` followed by the configured rules in order; a page
/// goes to the first rule that covers its route. Empty sections are dropped.
pub fn build_site_config(pages: &[PageRecord], cfg: &Config) -> SiteConfig {
    let mut groups: Vec<Vec<LinkEntry>> = vec![Vec::new(); cfg.sections.len() + 1];
    let base_url = cfg.base_url.trim_end_matches('/');

    for page in pages {
        if page.config.is_none() {
            continue;
        }
        if cfg.skip_metadata_fallback && page.uses_fallback {
            trace!("Leaving metadata-derived page {} out of the index", page.route);
            continue;
        }

        let slot = cfg
            .sections
            .iter()
            .position(|rule| rule_covers(rule, &page.route))
            .map_or(0, |idx| idx + 1);
        groups[slot].push(LinkEntry {
            title: page.config_str("title").map_or_else(|| route_label(&page.route), str::to_string),
            url: format!("{}{}", base_url, page.route),
            description: page.config_str("description").map(str::to_string),
        });
    }

    let titles = std::iter::once(MAIN_SECTION_TITLE).chain(cfg.sections.iter().map(|r| r.title.as_str()));
    let sections: Vec<Section> = titles
        .zip(groups)
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| Section { title: title.to_string(), items })
        .collect();
    debug!("Built site index with {} sections", sections.len());

    SiteConfig { title: cfg.title.clone(), description: cfg.description.clone(), sections }
}

fn rule_covers(rule: &SectionRule, route: &str) -> bool {
    if rule.prefix == "/" {
        return true;
    }
    route
        .strip_prefix(rule.prefix.as_str())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
