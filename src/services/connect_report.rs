//! Connect 信息 - 业务能力层
//!
//! 抓取 connect 页面的状态表并渲染成表格文本。

use anyhow::Result;
use tracing::info;

use crate::infrastructure::{eval_as, PageDriver};

/// 抓取所有至少含三列的表格行，取前三列文本
const STATUS_ROWS_JS: &str = r#"
(() => Array.from(document.querySelectorAll('table tr'))
    .map(tr => Array.from(tr.querySelectorAll('td')).map(td => td.textContent.trim()))
    .filter(cells => cells.length >= 3)
    .map(cells => cells.slice(0, 3)))()
"#;

/// 状态表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub project: String,
    pub current: String,
    pub requirement: String,
}

/// 打开 connect 页面并抓取全部状态行
pub async fn collect(page: &dyn PageDriver, connect_url: &str) -> Result<Vec<StatusRow>> {
    info!("获取连接信息");
    page.goto(connect_url).await?;
    page.wait_until_idle().await?;

    let cells: Vec<(String, String, String)> = eval_as(page, STATUS_ROWS_JS).await?;
    let rows = cells
        .into_iter()
        .map(|(project, current, requirement)| StatusRow {
            project,
            current,
            requirement,
        })
        .collect();
    Ok(rows)
}

/// 渲染成带边框的表格，表头：项目 / 当前 / 要求
pub fn render_table(rows: &[StatusRow]) -> String {
    const HEADERS: [&str; 3] = ["项目", "当前", "要求"];

    let mut widths = [0usize; 3];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in rows {
        let cells = [
            row.project.as_str(),
            row.current.as_str(),
            row.requirement.as_str(),
        ];
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = vec![border.clone(), render_line(HEADERS, &widths), border.clone()];
    if !rows.is_empty() {
        for row in rows {
            lines.push(render_line(
                [
                    row.project.as_str(),
                    row.current.as_str(),
                    row.requirement.as_str(),
                ],
                &widths,
            ));
        }
        lines.push(border);
    }
    lines.join("\n")
}

/// 打印最终报告
pub fn print_report(rows: &[StatusRow]) {
    println!("--------------Connect Info-----------------");
    println!("{}", render_table(rows));
}

fn render_line(cells: [&str; 3], widths: &[usize; 3]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| center(cell, *width))
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let total = width.saturating_sub(len);
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
