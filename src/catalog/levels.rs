//! Built-in level table.
//!
//! Levels grow from a single three-tag heading to four-floor documents. Text
//! content is usually the prefilled anchor; the player supplies the markup.

use super::{FloorDimensions, LevelDefinition, TagGroup};
use crate::constants::FLOOR_HEIGHT;

fn level(number: usize, floor_count: u32, dims: (f32, f32), tag_groups: Vec<TagGroup>) -> LevelDefinition {
    LevelDefinition {
        name: format!("Level {number}"),
        floor_count,
        floor_dimensions: FloorDimensions::new(dims.0, dims.1),
        floor_height: FLOOR_HEIGHT,
        tag_groups,
    }
}

pub fn default_levels() -> Vec<LevelDefinition> {
    vec![
        // Basic heading
        level(1, 1, (40.0, 40.0), vec![TagGroup::new(0, &["<h1>", "Hello World", "</h1>"], &[1])]),
        // Simple nesting
        level(
            2,
            2,
            (40.0, 40.0),
            vec![
                TagGroup::new(0, &["<div>", "<p>", "Welcome", "</p>", "</div>"], &[2]),
                TagGroup::new(1, &["<span>", "To HTML", "</span>"], &[1]),
            ],
        ),
        // Several elements per floor
        level(
            3,
            2,
            (40.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &["<section>", "<h2>", "Title", "</h2>", "<p>", "Content", "</p>", "</section>"],
                    &[2, 5],
                ),
                TagGroup::new(1, &["<article>", "<h3>", "Subtitle", "</h3>", "</article>"], &[2]),
            ],
        ),
        level(
            4,
            3,
            (40.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &["<main>", "<header>", "<h1>", "Main Title", "</h1>", "</header>", "</main>"],
                    &[3],
                ),
                TagGroup::new(
                    1,
                    &["<nav>", "<ul>", "<li>", "Menu Item", "</li>", "</ul>", "</nav>"],
                    &[3],
                ),
                TagGroup::new(2, &["<footer>", "<p>", "Copyright", "</p>", "</footer>"], &[2]),
            ],
        ),
        // Full document skeleton
        level(
            5,
            4,
            (40.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &["<html>", "<head>", "<title>", "Page Title", "</title>", "</head>", "</html>"],
                    &[3],
                ),
                TagGroup::new(
                    1,
                    &[
                        "<body>", "<header>", "<nav>", "<ul>", "<li>", "Home", "</li>", "</ul>",
                        "</nav>", "</header>", "</body>",
                    ],
                    &[5],
                ),
                TagGroup::new(
                    2,
                    &[
                        "<main>", "<article>", "<h1>", "Article Title", "</h1>", "<p>", "Content",
                        "</p>", "</article>", "</main>",
                    ],
                    &[3, 6],
                ),
                TagGroup::new(
                    3,
                    &[
                        "<footer>", "<div>", "<small>", "Copyright 2025", "</small>", "</div>",
                        "</footer>",
                    ],
                    &[3],
                ),
            ],
        ),
        // Forms
        level(
            6,
            3,
            (50.0, 40.0),
            vec![
                TagGroup::new(0, &["<form>", "<h2>", "Contact Form", "</h2>", "</form>"], &[2]),
                TagGroup::new(
                    1,
                    &["<label>", "Name:", "</label>", "<input>", "<br>", "<label>", "Email:", "</label>"],
                    &[1, 3, 6],
                ),
                TagGroup::new(
                    2,
                    &["<textarea>", "Your message", "</textarea>", "<button>", "Send", "</button>"],
                    &[1, 4],
                ),
            ],
        ),
        // Nested menus
        level(
            7,
            3,
            (50.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &["<nav>", "<ul>", "<li>", "Products", "</li>", "</ul>", "</nav>"],
                    &[3],
                ),
                TagGroup::new(
                    1,
                    &[
                        "<ul>", "<li>", "Category 1", "</li>", "<ul>", "<li>", "Subcategory",
                        "</li>", "</ul>", "</ul>",
                    ],
                    &[2, 6],
                ),
                TagGroup::new(
                    2,
                    &[
                        "<ul>", "<li>", "Category 2", "</li>", "<ul>", "<li>", "Subcategory",
                        "</li>", "</ul>", "</ul>",
                    ],
                    &[2, 6],
                ),
            ],
        ),
        // Tables
        level(
            8,
            3,
            (60.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &[
                        "<table>", "<thead>", "<tr>", "<th>", "Name", "</th>", "<th>", "Age",
                        "</th>", "</tr>", "</thead>", "</table>",
                    ],
                    &[4, 7],
                ),
                TagGroup::new(
                    1,
                    &[
                        "<tbody>", "<tr>", "<td>", "Ana", "</td>", "<td>", "25", "</td>", "</tr>",
                        "</tbody>",
                    ],
                    &[3, 6],
                ),
                TagGroup::new(
                    2,
                    &[
                        "<tfoot>", "<tr>", "<td>", "Total", "</td>", "<td>", "1 person", "</td>",
                        "</tr>", "</tfoot>",
                    ],
                    &[3, 6],
                ),
            ],
        ),
        // Portfolio page
        level(
            9,
            4,
            (60.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &["<html>", "<head>", "<title>", "My Portfolio", "</title>", "</head>", "</html>"],
                    &[3],
                ),
                TagGroup::new(
                    1,
                    &[
                        "<body>", "<header>", "<nav>", "<a>", "Home", "</a>", "<a>", "Projects",
                        "</a>", "</nav>", "</header>", "</body>",
                    ],
                    &[4, 7],
                ),
                TagGroup::new(
                    2,
                    &[
                        "<main>", "<section>", "<h1>", "My Work", "</h1>", "<article>",
                        "Project 1", "</article>", "</section>", "</main>",
                    ],
                    &[3, 6],
                ),
                TagGroup::new(
                    3,
                    &[
                        "<footer>", "<div>", "<p>", "Contact: email@example.com", "</p>",
                        "</div>", "</footer>",
                    ],
                    &[3],
                ),
            ],
        ),
        // Storefront
        level(
            10,
            4,
            (60.0, 40.0),
            vec![
                TagGroup::new(
                    0,
                    &[
                        "<html>", "<head>", "<meta>", "<title>", "Online Store", "</title>",
                        "<link>", "</head>", "</html>",
                    ],
                    &[4],
                ),
                TagGroup::new(
                    1,
                    &[
                        "<body>", "<header>", "<nav>", "<div>", "Logo", "</div>", "<ul>", "<li>",
                        "Cart", "</li>", "</ul>", "</nav>", "</header>", "</body>",
                    ],
                    &[4, 8],
                ),
                TagGroup::new(
                    2,
                    &[
                        "<main>", "<aside>", "<h2>", "Filters", "</h2>", "</aside>", "<section>",
                        "<h1>", "Featured Products", "</h1>", "</section>", "</main>",
                    ],
                    &[3, 8],
                ),
                TagGroup::new(
                    3,
                    &[
                        "<footer>", "<section>", "<h3>", "Newsletter", "</h3>", "<form>",
                        "<input>", "<button>", "Subscribe", "</button>", "</form>", "</section>",
                        "</footer>",
                    ],
                    &[3, 8],
                ),
            ],
        ),
    ]
}
