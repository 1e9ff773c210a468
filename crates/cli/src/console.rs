use ferrous_hosts_application::use_cases::{LocalAnswer, ResolveLocalHostUseCase};
use ferrous_hosts_domain::{reverse_name, DnsQuery, RecordType};
use std::net::IpAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// Answers `<name> [type]` queries read line by line from stdin until EOF.
pub async fn run(use_case: &ResolveLocalHostUseCase) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match parse_query(&line) {
            Ok(query) => format_answer(&query, &use_case.execute(&query)),
            Err(e) => format!("error: {}\n", e),
        };
        stdout.write_all(reply.as_bytes()).await?;
        stdout.flush().await?;
    }

    debug!("stdin closed");
    Ok(())
}

/// Parses one query line. The type defaults to `PTR` for reverse names and
/// addresses and to `A` otherwise; a bare address is turned into its
/// reverse name.
fn parse_query(line: &str) -> Result<DnsQuery, String> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or_else(|| "empty query".to_string())?;

    let explicit = tokens.next().map(parse_record_type).transpose()?;
    if tokens.next().is_some() {
        return Err("expected: <name> [type]".to_string());
    }

    if let Ok(ip) = name.parse::<IpAddr>() {
        let record_type = explicit.unwrap_or(RecordType::PTR);
        return Ok(DnsQuery::new(reverse_name::encode(&ip), record_type));
    }

    let record_type = explicit.unwrap_or_else(|| {
        if reverse_name::decode(name).is_some() {
            RecordType::PTR
        } else {
            RecordType::A
        }
    });
    Ok(DnsQuery::new(name, record_type))
}

/// Accepts mnemonics (`AAAA`), bare wire codes (`28`) and the generic
/// `TYPE28` form.
fn parse_record_type(token: &str) -> Result<RecordType, String> {
    let digits = match token.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("TYPE") => &token[4..],
        _ => token,
    };
    match digits.parse::<u16>() {
        Ok(code) => {
            RecordType::from_u16(code).ok_or_else(|| format!("Unknown record type: {}", token))
        }
        Err(_) => token.parse(),
    }
}

fn format_answer(query: &DnsQuery, answer: &LocalAnswer) -> String {
    match answer {
        LocalAnswer::Addresses(ips) => ips
            .iter()
            .map(|ip| format!("{} {} {}\n", query.domain, query.record_type, ip))
            .collect(),
        LocalAnswer::Hostname(host) => {
            format!("{} {} {}\n", query.domain, query.record_type, host)
        }
        LocalAnswer::NotFound => format!("{} {} NXDOMAIN\n", query.domain, query.record_type),
    }
}
