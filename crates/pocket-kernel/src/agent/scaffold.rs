//! Starter project templates for `create_project_scaffold`.
//!
//! A template is a list of files keyed by path relative to the project
//! directory. `{name}` in any content is replaced with the project name.
//! The whole project is built off to the side and grafted into the
//! workspace in one commit, so a failure leaves nothing behind.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use pocket_vfs::Tree;

use super::error::ToolError;
use super::tools::{AgentEnv, AgentTool, CREATE_PROJECT_SCAFFOLD, require, resolve};
use crate::tools::{ParamSchema, ToolArgs, ToolSchema};

/// Kinds of project the scaffold tool can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectTemplate {
    React,
    Python,
    Node,
    Html,
}

impl FromStr for ProjectTemplate {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(Self::React),
            "python" => Ok(Self::Python),
            "node" | "nodejs" => Ok(Self::Node),
            "html" | "web" => Ok(Self::Html),
            _ => Err(ToolError::UnknownProjectType(s.to_string())),
        }
    }
}

impl ProjectTemplate {
    /// How the project is named in the success message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::React => "React",
            Self::Python => "Python",
            Self::Node => "Node.js",
            Self::Html => "HTML/CSS/JS",
        }
    }

    fn templates(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::React => &[
                ("package.json", REACT_PACKAGE_JSON),
                ("public/index.html", REACT_INDEX_HTML),
                ("src/index.js", REACT_INDEX_JS),
                ("src/App.js", REACT_APP_JS),
            ],
            Self::Python => &[
                ("main.py", PYTHON_MAIN),
                ("requirements.txt", PYTHON_REQUIREMENTS),
                ("README.md", PYTHON_README),
            ],
            Self::Node => &[("package.json", NODE_PACKAGE_JSON), ("index.js", NODE_INDEX_JS)],
            Self::Html => &[
                ("index.html", HTML_INDEX),
                ("styles.css", HTML_STYLES),
                ("script.js", HTML_SCRIPT),
            ],
        }
    }

    /// The project's files with `name` filled in.
    pub fn files(&self, name: &str) -> Vec<(&'static str, String)> {
        self.templates()
            .iter()
            .map(|(path, body)| (*path, body.replace("{name}", name)))
            .collect()
    }
}

pub struct CreateProjectScaffold;

#[async_trait]
impl AgentTool for CreateProjectScaffold {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            CREATE_PROJECT_SCAFFOLD,
            "Generate a complete project structure based on the specified project type (react, python, node, etc.).",
        )
        .param(ParamSchema::required(
            "project_type",
            "string",
            "The type of project to create (react, python, node, html, etc.).",
        ))
        .param(ParamSchema::required("project_name", "string", "The name of the project."))
        .param(ParamSchema::required(
            "target_directory",
            "string",
            "Directory where to create the project (use '.' for current directory).",
        ))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let kind = require(args, CREATE_PROJECT_SCAFFOLD, "project_type")?;
        let name = require(args, CREATE_PROJECT_SCAFFOLD, "project_name")?;
        let target = require(args, CREATE_PROJECT_SCAFFOLD, "target_directory")?;

        let template: ProjectTemplate = kind.parse()?;
        let base = if target == "." {
            name.to_string()
        } else {
            format!("{target}/{name}")
        };

        let project = Tree::from_files(template.files(name))
            .map_err(|_| ToolError::ProjectDirectoryFailed(base.clone()))?;
        env.vfs
            .create_node(&resolve(&base), Arc::clone(project.root()))
            .map_err(|e| {
                tracing::debug!(error = %e, %base, "scaffold rejected");
                ToolError::ProjectDirectoryFailed(base.clone())
            })?;

        Ok(format!(
            "Successfully created {} project '{name}' at {base}",
            template.label()
        ))
    }
}

// === Templates ===

const REACT_PACKAGE_JSON: &str = r#"{
  "name": "{name}",
  "version": "0.1.0",
  "private": true,
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "react-scripts": "5.0.1"
  },
  "scripts": {
    "start": "react-scripts start",
    "build": "react-scripts build",
    "test": "react-scripts test",
    "eject": "react-scripts eject"
  }
}"#;

const REACT_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{name}</title>
</head>
<body>
    <div id="root"></div>
</body>
</html>"#;

const REACT_INDEX_JS: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(<App />);"#;

const REACT_APP_JS: &str = r#"import React from 'react';

function App() {
  return (
    <div className="App">
      <h1>Welcome to {name}</h1>
      <p>Your React app is ready to go!</p>
    </div>
  );
}

export default App;"#;

const PYTHON_MAIN: &str = r#"#!/usr/bin/env python3
"""
{name} - A Python project
"""

def main():
    print("Hello from {name}!")
    print("Your Python project is ready!")

if __name__ == "__main__":
    main()"#;

const PYTHON_REQUIREMENTS: &str = "# Add your Python dependencies here
# Example:
# requests>=2.25.1
# flask>=2.0.1";

const PYTHON_README: &str = "# {name}

A Python project created with PocketCode.

## Setup

1. Install dependencies:
   ```
   pip install -r requirements.txt
   ```

2. Run the project:
   ```
   python main.py
   ```";

const NODE_PACKAGE_JSON: &str = r#"{
  "name": "{name}",
  "version": "1.0.0",
  "description": "{name} - A Node.js project",
  "main": "index.js",
  "scripts": {
    "start": "node index.js",
    "dev": "nodemon index.js"
  },
  "dependencies": {},
  "devDependencies": {
    "nodemon": "^2.0.20"
  }
}"#;

const NODE_INDEX_JS: &str = r#"// {name} - Node.js Application
const express = require('express');

const app = express();
const port = process.env.PORT || 3000;

app.use(express.json());

app.get('/', (req, res) => {
    res.json({
        message: 'Welcome to {name}!',
        status: 'Your Node.js app is ready!'
    });
});

app.listen(port, () => {
    console.log(`Server running on port ${port}`);
});"#;

const HTML_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name}</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <div class="container">
        <h1>Welcome to {name}</h1>
        <p>Your web project is ready!</p>
        <button onclick="showAlert()">Click me!</button>
    </div>
    <script src="script.js"></script>
</body>
</html>"#;

const HTML_STYLES: &str = "/* {name} Styles */
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: Arial, sans-serif;
    line-height: 1.6;
    color: #333;
    background-color: #f4f4f4;
}

.container {
    max-width: 800px;
    margin: 50px auto;
    padding: 20px;
    background: white;
    border-radius: 10px;
    box-shadow: 0 0 10px rgba(0,0,0,0.1);
    text-align: center;
}

h1 {
    color: #2c3e50;
    margin-bottom: 20px;
}

button {
    background: #3498db;
    color: white;
    padding: 10px 20px;
    border: none;
    border-radius: 5px;
    cursor: pointer;
    font-size: 16px;
    margin-top: 20px;
}

button:hover {
    background: #2980b9;
}";

const HTML_SCRIPT: &str = r#"// {name} JavaScript
console.log('{name} loaded successfully!');

function showAlert() {
    alert('Hello from {name}! Your web project is working!');
}

// Add your JavaScript code here
document.addEventListener('DOMContentLoaded', function() {
    console.log('DOM loaded, {name} is ready!');
});"#;
