//! Plain-text rendering for `deptctl` listings.

use std::fmt::Write as _;

use shared::{
    domain::{Department, SubDepartment},
    pagination::{Page, PageInfo},
};

fn footer(out: &mut String, info: &PageInfo) {
    if info.total_pages > 1 {
        let _ = writeln!(
            out,
            "Page {} of {} ({} total)",
            info.current_page, info.total_pages, info.total
        );
    }
}

fn created_line(department: &Department) -> String {
    match department.created_on() {
        Some(date) => format!("Created by {} on {date}", department.creator_name()),
        None => format!("Created by {}", department.creator_name()),
    }
}

pub fn department_page(page: &Page<Department>) -> String {
    let mut out = String::new();
    if page.is_empty() {
        out.push_str("No departments found. Create one to get started!\n");
        return out;
    }
    for department in &page.items {
        let _ = writeln!(out, "[{}] {}", department.id, department.name);
        if department.sub_departments.is_empty() {
            out.push_str("    No sub-departments\n");
        } else {
            let names: Vec<&str> = department
                .sub_departments
                .iter()
                .map(|sub| sub.name.as_str())
                .collect();
            let _ = writeln!(out, "    {}", names.join(", "));
        }
        let _ = writeln!(out, "    {}", created_line(department));
    }
    footer(&mut out, &page.info);
    out
}

pub fn department_details(department: &Department, subs: &Page<SubDepartment>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", department.id, department.name);
    let _ = writeln!(out, "{}", created_line(department));
    out.push_str("\nCurrent Sub-Departments\n");
    if subs.is_empty() {
        out.push_str("    No sub-departments\n");
    }
    for sub in &subs.items {
        let _ = writeln!(out, "    [{}] {}", sub.id, sub.name);
    }
    footer(&mut out, &subs.info);
    out
}
