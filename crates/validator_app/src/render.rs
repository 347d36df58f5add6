use validator_core::{AppViewModel, DownloadState, Severity};

const BAR_WIDTH: usize = 30;

/// Build the terminal lines for one view snapshot. Pure; printing is left
/// to `present`.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(progress) = &view.progress {
        // The bar itself has to clamp to its width; the labels keep the
        // reported values verbatim.
        let filled =
            (progress.percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
        let mut line = format!(
            "[{bar}] {} | {} | ETA {}",
            progress.percent_label, progress.counts_label, progress.eta_label
        );
        if let Some(current) = &progress.current_file {
            line.push_str(&format!(" | {current}"));
        }
        lines.push(line);
        if !progress.message.is_empty() {
            lines.push(progress.message.clone());
        }
    }

    if let Some(notice) = &view.notice {
        lines.push(match notice.severity {
            Severity::Error => format!("error: {}", notice.text),
            Severity::Success => format!("ok: {}", notice.text),
            Severity::Info => notice.text.clone(),
        });
    }

    if let DownloadState::Saved { path } = &view.download {
        lines.push(format!("result: {path}"));
    }

    lines
}

pub fn present(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
