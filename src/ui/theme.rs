use ratatui::style::Color;

/// 색상 테마
///
/// 위젯은 기본 색상을 갖고 있고 `.theme(&theme)`으로 한 번에 덮어쓴다.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: Color,
    pub fg_primary: Color,

    // 패널
    pub panel_active_border: Color,
    pub panel_inactive_border: Color,
    pub panel_bg: Color,

    // 파일 리스트
    pub file_normal: Color,
    pub file_selected: Color,
    pub file_selected_bg: Color,
    pub file_marked: Color,
    pub directory: Color,
    pub parent_link: Color,

    // 하단 바
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub command_bar_bg: Color,
    pub command_bar_fg: Color,

    // 강조
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: Color::Rgb(30, 30, 30),
            fg_primary: Color::Rgb(212, 212, 212),

            panel_active_border: Color::Rgb(0, 120, 212),
            panel_inactive_border: Color::Rgb(60, 60, 60),
            panel_bg: Color::Rgb(30, 30, 30),

            file_normal: Color::Rgb(212, 212, 212),
            file_selected: Color::Rgb(255, 255, 255),
            file_selected_bg: Color::Rgb(0, 120, 212),
            file_marked: Color::Rgb(255, 215, 0),
            directory: Color::Rgb(86, 156, 214),
            parent_link: Color::Rgb(150, 150, 150),

            status_bar_bg: Color::Rgb(0, 122, 204),
            status_bar_fg: Color::Rgb(255, 255, 255),
            command_bar_bg: Color::Rgb(30, 30, 30),
            command_bar_fg: Color::Rgb(212, 212, 212),

            accent: Color::Rgb(0, 120, 212),
            warning: Color::Rgb(255, 200, 0),
            error: Color::Rgb(244, 71, 71),
        }
    }
}
