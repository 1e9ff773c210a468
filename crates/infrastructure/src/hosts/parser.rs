use ferrous_hosts_domain::HostEntry;
use std::net::IpAddr;
use tracing::trace;

/// Parses one `<address> <alias>... [# comment]` line.
///
/// Returns `None` for blank lines, comments, lines whose first token is not
/// an IP address and lines that name no alias.
pub fn parse_hosts_line(line: &str) -> Option<HostEntry> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = line.split_whitespace();
    let ip: IpAddr = tokens.next()?.parse().ok()?;

    let entry = HostEntry::new(ip, tokens);
    if entry.is_empty() {
        return None;
    }
    Some(entry)
}

pub fn parse_hosts_text(text: &str) -> Vec<HostEntry> {
    let mut entries = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        match parse_hosts_line(line) {
            Some(entry) => entries.push(entry),
            None => {
                let content = line.trim();
                if !content.is_empty() && !content.starts_with('#') {
                    trace!(line = line_num + 1, content, "Skipping malformed hosts line");
                }
            }
        }
    }

    entries
}
