//! Page-flow demo (for testing purposes only)
//! The main interface is through WASM bindings.

use page_flow::{
    FooterText, GeometryConfig, MarginUpdate, PaginationLayout, PaginatorBuilder,
    SimulatedSurface,
};

fn print_layout(title: &str, layout: &PaginationLayout) {
    println!("{}", title);
    println!(
        "  content: {:.0}px in {} blocks",
        layout.sample.total_content_height, layout.sample.block_count
    );
    println!(
        "  breaks: {} rendered, {} visible, container min height {:.0}px",
        layout.breaks.len(),
        layout.visible_breaks().len(),
        layout.min_height
    );
    for descriptor in layout.visible_breaks() {
        println!(
            "    page {}: footer \"{}\", header {:.0}px",
            descriptor.footer.page_number, descriptor.footer.footer_text, descriptor.header.height
        );
    }
    println!();
}

fn main() -> page_flow::Result<()> {
    env_logger::init();

    println!("Page-flow Pagination Engine");
    println!("===========================");
    println!();

    let geometry = GeometryConfig {
        footer_text: FooterText::computed(|page| format!("Page {}", page)),
        ..GeometryConfig::default()
    };
    let surface = SimulatedSurface::with_blocks(600.0, (0..24).map(|i| 60.0 + (i % 5) as f32 * 25.0));
    let mut paginator = PaginatorBuilder::new(geometry).label("demo").build(surface)?;

    paginator.mount();
    if let Some(layout) = paginator.layout() {
        print_layout("After mount:", layout);
    }

    for _ in 0..12 {
        paginator.surface_mut().push_block(120.0);
    }
    paginator.refresh_pagination();
    if let Some(layout) = paginator.layout() {
        print_layout("After appending content:", layout);
    }

    paginator.update_page_margins(MarginUpdate {
        top: Some(20.0),
        bottom: Some(40.0),
        ..MarginUpdate::default()
    })?;
    if let Some(layout) = paginator.layout() {
        print_layout("After margin update:", layout);
    }

    let stats = paginator.stats();
    log::info!("demo finished after {} resyntheses", stats.resyntheses);
    println!(
        "{} resyntheses, {} style injections",
        stats.resyntheses, stats.style_issues
    );
    Ok(())
}
