// Frame renderer - ratatui 프레임 위에 패널 목록을 그리는 렌더러

use crate::core::{ListingRenderer, PaneView};
use crate::ui::components::Panel;
use crate::ui::{LayoutManager, Theme};
use ratatui::Frame;

/// `ListingRenderer` 구현 (레이아웃이 정한 패널 영역에 그린다)
pub struct FrameRenderer<'f, 'a> {
    frame: &'f mut Frame<'a>,
    layout: &'f LayoutManager,
    theme: &'f Theme,
}

impl<'f, 'a> FrameRenderer<'f, 'a> {
    pub fn new(frame: &'f mut Frame<'a>, layout: &'f LayoutManager, theme: &'f Theme) -> Self {
        Self {
            frame,
            layout,
            theme,
        }
    }
}

impl ListingRenderer for FrameRenderer<'_, '_> {
    fn render_listing(&mut self, view: &PaneView<'_>) {
        let area = self.layout.panel_area(view.id);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let panel = Panel::from_view(view).theme(self.theme);
        self.frame.render_widget(panel, area);
    }
}
