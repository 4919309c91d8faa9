// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic plant trees for the layout benchmarks (no RNG).

use caex_links::model::{CaexElement, ElementId, MemoryTree, NodeKey, RowMetrics};
use caex_links::Graph;

const INTERFACE_CLASSES: [&str; 4] = [
    "AutomationMLInterfaceClassLib/AutomationMLBaseInterface/SignalInterface",
    "AutomationMLInterfaceClassLib/AutomationMLBaseInterface/PowerInterface",
    "AutomationMLInterfaceClassLib/AutomationMLBaseInterface/MaterialInterface",
    "AutomationMLInterfaceClassLib/AutomationMLBaseInterface/Order",
];

fn padded_name(prefix: &str, index: usize, target_len: usize) -> String {
    let mut out = format!("{prefix}{index}");
    while out.len() < target_len {
        out.push('_');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub sections: usize,
    pub rows_per_section: usize,
    pub links: usize,
    pub name_len: usize,
    /// Viewport height in rows; `None` shows the whole tree.
    pub viewport_rows: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeScrolled,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeScrolled => "large_scrolled",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params {
                sections: 4,
                rows_per_section: 6,
                links: 12,
                name_len: 12,
                viewport_rows: None,
            },
            Self::MediumDense => Params {
                sections: 12,
                rows_per_section: 12,
                links: 120,
                name_len: 18,
                viewport_rows: None,
            },
            Self::LargeScrolled => Params {
                sections: 40,
                rows_per_section: 20,
                links: 400,
                name_len: 24,
                viewport_rows: Some(60),
            },
        }
    }
}

pub struct Fixture {
    pub tree: MemoryTree,
    pub graph: Graph,
    pub rows: Vec<NodeKey>,
}

pub fn fixture(case: Case) -> Fixture {
    plant(case.params())
}

pub fn plant(params: Params) -> Fixture {
    let mut metrics = RowMetrics::default();
    let total_rows = 1 + params.sections * (1 + params.rows_per_section);
    let shown_rows = params.viewport_rows.unwrap_or(total_rows);
    metrics.viewport_height = shown_rows as f64 * metrics.row_height;
    // Scroll to the middle so links leave the viewport in both directions.
    metrics.scroll_offset =
        total_rows.saturating_sub(shown_rows) as f64 / 2.0 * metrics.row_height;

    let mut tree = MemoryTree::new(metrics);
    let element = |id: String, name: String| {
        CaexElement::new(ElementId::new(id).expect("valid element id"), name)
    };
    let root = tree.insert(None, element("plant".to_owned(), "Plant".to_owned())).expect("root");

    let mut rows = Vec::new();
    for section in 0..params.sections {
        let name = padded_name("Cell", section, params.name_len);
        let cell = tree
            .insert(Some(root), element(format!("cell-{section}"), name))
            .expect("section");
        for row in 0..params.rows_per_section {
            let name = padded_name("Port", row, params.name_len - (row % 5));
            let port = tree
                .insert(Some(cell), element(format!("port-{section}-{row}"), name))
                .expect("row");
            rows.push(port);
        }
    }
    tree.expand_all();

    let mut graph = Graph::new();
    let n = rows.len();
    for link in 0..params.links {
        let a = (link * 7) % n;
        let b = (a + 1 + (link * 13) % (n / 2).max(1)) % n;
        let class = INTERFACE_CLASSES[link % INTERFACE_CLASSES.len()];
        graph.add_link(rows[a], rows[b], Some(class.into()));
    }

    Fixture { tree, graph, rows }
}
