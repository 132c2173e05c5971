// ==========================================
// O&M Readiness Tracker - Component Catalog
// ==========================================
// Static checklist seeded into the `components` table once.
// Groups and variants mirror the field checklist used by the
// district engineers.
// ==========================================

use crate::domain::types::{EntryKind, SiteVariant};

/// One catalog line before it receives a database id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub group: &'static str,
    pub site: SiteVariant,
    pub kind: EntryKind,
    pub unit: &'static str,
}

const fn main_metric(name: &'static str, group: &'static str, unit: &'static str) -> CatalogItem {
    CatalogItem {
        name,
        group,
        site: SiteVariant::Main,
        kind: EntryKind::Metric,
        unit,
    }
}

const fn main_task(name: &'static str, group: &'static str) -> CatalogItem {
    CatalogItem {
        name,
        group,
        site: SiteVariant::Main,
        kind: EntryKind::Task,
        unit: "%",
    }
}

const fn secondary_task(name: &'static str, group: &'static str) -> CatalogItem {
    CatalogItem {
        name,
        group,
        site: SiteVariant::Secondary,
        kind: EntryKind::Task,
        unit: "%",
    }
}

pub const DEFAULT_COMPONENTS: &[CatalogItem] = &[
    // Distribution Line
    main_metric("Pipe Laying", "Distribution Line", "Km"),
    main_metric("FHTC Installation", "Distribution Line", "Nos."),
    main_metric("Stand Post Installation", "Distribution Line", "Nos."),
    main_task("Grouting of FHTC", "Distribution Line"),
    main_metric("Sluice Valves", "Distribution Line", "Nos."),
    main_metric("Air Valves", "Distribution Line", "Nos."),
    main_metric("Fire Hydrant", "Distribution Line", "Nos."),
    // OHT
    main_task("OHT Structure", "OHT"),
    main_task("OHT Staircase", "OHT"),
    main_task("Tank/Dome Installation", "OHT"),
    main_task("Structure/Tank Painting", "OHT"),
    main_task("SWSM Logo", "OHT"),
    main_task("Lightening Arrester Installation", "OHT"),
    main_task("Lightening Arrester Earthing", "OHT"),
    main_task("Railing Installation", "OHT"),
    main_task("Railing Painting", "OHT"),
    main_task("Inlet/Outlet/Washout Piping", "OHT"),
    main_task("All Valve Chambers", "OHT"),
    main_task("Apron & Flooring", "OHT"),
    // Pump House
    main_task("Pump House Civil Construction", "Pump House"),
    main_task("Doors Installation & Painting", "Pump House"),
    main_task("Windows Installation & Painting", "Pump House"),
    main_task("Pump & Motor Installation", "Pump House"),
    main_task("Internal Cabling & Lighting", "Pump House"),
    main_task("DG Set Foundation & Installation", "Pump House"),
    main_task("DG Set Earthing", "Pump House"),
    main_task("RTU Panel & VFD Installation", "Pump House"),
    main_task("Chlorine Dosing System", "Pump House"),
    main_task("Sensors & Flowmeters", "Pump House"),
    // Boundary Wall
    main_task("Boundary Wall Construction", "Boundary Wall"),
    main_task("Boundary Wall Painting", "Boundary Wall"),
    main_task("Main Gate Installation & Painting", "Boundary Wall"),
    main_task("Wicket Gate Installation & Painting", "Boundary Wall"),
    // Solar Plant
    main_task("Structure Installation", "Solar Plant"),
    main_task("Panels Installation & Alignment", "Solar Plant"),
    main_task("Cabling & RTU Connection", "Solar Plant"),
    main_task("Plant Earthing", "Solar Plant"),
    main_task("Lightening Arrester", "Solar Plant"),
    main_task("Interlocking Work", "Solar Plant"),
    // Campus Development
    main_task("Interlocking Road", "Campus Development"),
    main_task("Recharge Pit", "Campus Development"),
    main_task("Solar Street Lights", "Campus Development"),
    main_task("Landscaping & Debris Removal", "Campus Development"),
    main_task("Site Sign Board", "Campus Development"),
    main_task("All Site Drains", "Campus Development"),
    // Final Certification
    main_metric("HGJ Certification", "Final Certification", "Villages"),
    main_metric("Road Restoration Certificate", "Final Certification", "Villages"),
    // Secondary (TW-2) site
    secondary_task("Pump House Construction", "Pump House TW-2"),
    secondary_task("Doors & Windows", "Pump House TW-2"),
    secondary_task("Pump & Motor Installation", "Pump House TW-2"),
    secondary_task("Electrical & DG Set", "Pump House TW-2"),
    secondary_task("Automation & Sensors", "Pump House TW-2"),
    secondary_task("Boundary Wall & Gates", "Site Development TW-2"),
    secondary_task("Solar Plant", "Site Development TW-2"),
];

/// Items of one site variant, in checklist order
pub fn items_for_site(site: SiteVariant) -> impl Iterator<Item = &'static CatalogItem> {
    DEFAULT_COMPONENTS.iter().filter(move |c| c.site == site)
}

/// Distinct group names of one site variant, in first-seen order
pub fn groups_for_site(site: SiteVariant) -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = Vec::new();
    for item in items_for_site(site) {
        if !groups.contains(&item.group) {
            groups.push(item.group);
        }
    }
    groups
}
