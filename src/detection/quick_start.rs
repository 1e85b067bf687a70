//! Quick-start recipe selection
//!
//! Recipes override one another in a fixed order (static site, Node.js,
//! Python); the last applicable one wins. Docker instructions are the only
//! addition that stacks on top of whichever recipe was chosen.

use super::markers::MarkerScan;
use super::types::{CodeBlock, QuickStart};

const STATIC_STEPS: &[&str] = &[
    "Download or clone this repository.",
    "Open `index.html` in your browser.",
    "Optional: serve locally to avoid CORS/module issues.",
];
const STATIC_BLOCKS: &[&str] = &["python -m http.server 8000\n# then visit http://localhost:8000"];

const NODE_STEPS: &[&str] = &["Install dependencies", "Start dev server", "Build for production"];
const NODE_BLOCKS: &[&str] = &[
    "npm install   # or pnpm/yarn\nnpm run dev",
    "npm run build",
];

const PYTHON_STEPS: &[&str] = &["Create & activate venv", "Install deps", "Run app/module"];
const PYTHON_BLOCKS: &[&str] = &[
    "python -m venv .venv\n# Windows\n.\\.venv\\Scripts\\activate\n# Unix\nsource .venv/bin/activate",
    "pip install -r requirements.txt  # or use pyproject with your tool",
    "python app.py  # adjust to your entrypoint",
];

const DOCKER_BLOCK: &str = "docker build -t app .\ndocker run -p 3000:3000 app";

fn recipe(steps: &[&str], blocks: &[&str]) -> QuickStart {
    QuickStart {
        steps: steps.iter().map(|s| s.to_string()).collect(),
        code_blocks: blocks.iter().map(|c| CodeBlock::bash(*c)).collect(),
    }
}

pub fn select_quick_start(markers: &MarkerScan) -> QuickStart {
    let mut quick_start = QuickStart::default();

    if markers.index_html && !markers.package_json && !markers.python() {
        quick_start = recipe(STATIC_STEPS, STATIC_BLOCKS);
    }

    if markers.package_json {
        quick_start = recipe(NODE_STEPS, NODE_BLOCKS);
    }

    if markers.python() {
        quick_start = recipe(PYTHON_STEPS, PYTHON_BLOCKS);
    }

    if markers.dockerfile {
        quick_start.code_blocks.push(CodeBlock::bash(DOCKER_BLOCK));
    }

    quick_start
}
