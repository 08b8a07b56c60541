//! Built-in string tables for every supported [`Language`].
//!
//! Keys are shared by all tables; `task_count` is a plural entry whose
//! `{count}` is filled by [`StringCatalog::format_plural`].

use crate::catalog::{LocaleStrings, StringCatalog};
use crate::language::Language;
use crate::plural::PluralForms;

/// Build the catalog holding every bundled language, falling back to English.
#[must_use]
pub fn bundled_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();
    for language in Language::ALL {
        catalog.add_language(language, strings_for(language));
    }
    catalog.set_fallback_chain(vec![Language::English]);
    catalog
}

fn strings_for(language: Language) -> LocaleStrings {
    match language {
        Language::English => english(),
        Language::SimplifiedChinese => simplified_chinese(),
        Language::TraditionalChinese => traditional_chinese(),
        Language::German => german(),
        Language::Japanese => japanese(),
        Language::Korean => korean(),
        Language::French => french(),
        Language::Spanish => spanish(),
    }
}

fn table(entries: &[(&str, &str)], task_count: PluralForms) -> LocaleStrings {
    let mut strings = LocaleStrings::new();
    for (key, value) in entries {
        strings.insert(*key, *value);
    }
    strings.insert_plural("task_count", task_count);
    strings
}

fn english() -> LocaleStrings {
    table(
        &[
            ("app_name", "Focus Forest"),
            ("dashboard", "Dashboard"),
            ("forest", "My Forest"),
            ("rooms", "Study Rooms"),
            ("stats", "Statistics"),
            ("settings", "Settings"),
            ("language", "Language"),
            ("what_to_focus_on", "What to focus on?"),
            ("start", "Start Focus"),
            ("finish", "Finish Session"),
            ("task_completed", "Task Completed!"),
            ("plant_tree", "Plant a Tree"),
            ("invite", "Invite"),
            ("create_room", "Create Room"),
            ("theme_color", "Theme Color"),
            ("view_by", "View by:"),
            ("daily", "Daily"),
            ("weekly", "Weekly"),
            ("monthly", "Monthly"),
            ("yearly", "Yearly"),
            ("username", "Username"),
            ("font_size", "Font Size"),
            ("small", "Small"),
            ("medium", "Medium"),
            ("large", "Large"),
            ("profile", "Profile"),
            ("appearance", "Appearance"),
        ],
        PluralForms::new("{count} task", "{count} tasks"),
    )
}

fn simplified_chinese() -> LocaleStrings {
    table(
        &[
            ("app_name", "专注森林"),
            ("dashboard", "仪表盘"),
            ("forest", "我的森林"),
            ("rooms", "自习室"),
            ("stats", "统计"),
            ("settings", "设置"),
            ("language", "语言"),
            ("what_to_focus_on", "专注什么？"),
            ("start", "开始专注"),
            ("finish", "完成"),
            ("task_completed", "任务完成！"),
            ("plant_tree", "种一棵树"),
            ("invite", "邀请"),
            ("create_room", "创建自习室"),
            ("theme_color", "主题颜色"),
            ("view_by", "查看方式："),
            ("daily", "每日"),
            ("weekly", "每周"),
            ("monthly", "每月"),
            ("yearly", "每年"),
            ("username", "用户名"),
            ("font_size", "字体大小"),
            ("small", "小"),
            ("medium", "中"),
            ("large", "大"),
            ("profile", "个人资料"),
            ("appearance", "外观"),
        ],
        PluralForms::invariant("{count} 项任务"),
    )
}

fn traditional_chinese() -> LocaleStrings {
    table(
        &[
            ("app_name", "專注森林"),
            ("dashboard", "儀表板"),
            ("forest", "我的森林"),
            ("rooms", "自習室"),
            ("stats", "統計"),
            ("settings", "設定"),
            ("language", "語言"),
            ("what_to_focus_on", "專注什麼？"),
            ("start", "開始專注"),
            ("finish", "完成"),
            ("task_completed", "任務完成！"),
            ("plant_tree", "種一棵樹"),
            ("invite", "邀請"),
            ("create_room", "創建自習室"),
            ("theme_color", "主題顏色"),
            ("view_by", "查看方式："),
            ("daily", "每日"),
            ("weekly", "每週"),
            ("monthly", "每月"),
            ("yearly", "每年"),
            ("username", "用戶名"),
            ("font_size", "字體大小"),
            ("small", "小"),
            ("medium", "中"),
            ("large", "大"),
            ("profile", "個人資料"),
            ("appearance", "外觀"),
        ],
        PluralForms::invariant("{count} 項任務"),
    )
}

fn german() -> LocaleStrings {
    table(
        &[
            ("app_name", "Fokuswald"),
            ("dashboard", "Dashboard"),
            ("forest", "Mein Wald"),
            ("rooms", "Studienräume"),
            ("stats", "Statistiken"),
            ("settings", "Einstellungen"),
            ("language", "Sprache"),
            ("what_to_focus_on", "Worauf konzentrieren?"),
            ("start", "Fokus starten"),
            ("finish", "Sitzung beenden"),
            ("task_completed", "Aufgabe abgeschlossen!"),
            ("plant_tree", "Einen Baum pflanzen"),
            ("invite", "Einladen"),
            ("create_room", "Raum erstellen"),
            ("theme_color", "Themenfarbe"),
            ("view_by", "Anzeigen nach:"),
            ("daily", "Täglich"),
            ("weekly", "Wöchentlich"),
            ("monthly", "Monatlich"),
            ("yearly", "Jährlich"),
            ("username", "Benutzername"),
            ("font_size", "Schriftgröße"),
            ("small", "Klein"),
            ("medium", "Mittel"),
            ("large", "Groß"),
            ("profile", "Profil"),
            ("appearance", "Erscheinungsbild"),
        ],
        PluralForms::new("{count} Aufgabe", "{count} Aufgaben"),
    )
}

fn japanese() -> LocaleStrings {
    table(
        &[
            ("app_name", "集中フォレスト"),
            ("dashboard", "ダッシュボード"),
            ("forest", "私の森"),
            ("rooms", "自習室"),
            ("stats", "統計"),
            ("settings", "設定"),
            ("language", "言語"),
            ("what_to_focus_on", "何に集中しますか？"),
            ("start", "集中開始"),
            ("finish", "セッション終了"),
            ("task_completed", "タスク完了！"),
            ("plant_tree", "木を植える"),
            ("invite", "招待"),
            ("create_room", "ルームを作成"),
            ("theme_color", "テーマカラー"),
            ("view_by", "表示順："),
            ("daily", "毎日"),
            ("weekly", "毎週"),
            ("monthly", "毎月"),
            ("yearly", "毎年"),
            ("username", "ユーザー名"),
            ("font_size", "フォントサイズ"),
            ("small", "小"),
            ("medium", "中"),
            ("large", "大"),
            ("profile", "プロフィール"),
            ("appearance", "外観"),
        ],
        PluralForms::invariant("{count} タスク"),
    )
}

fn korean() -> LocaleStrings {
    table(
        &[
            ("app_name", "집중의 숲"),
            ("dashboard", "대시보드"),
            ("forest", "나의 숲"),
            ("rooms", "스터디룸"),
            ("stats", "통계"),
            ("settings", "설정"),
            ("language", "언어"),
            ("what_to_focus_on", "무엇에 집중할까요?"),
            ("start", "집중 시작"),
            ("finish", "세션 종료"),
            ("task_completed", "작업 완료!"),
            ("plant_tree", "나무 심기"),
            ("invite", "초대하기"),
            ("create_room", "스터디룸 만들기"),
            ("theme_color", "테마 색상"),
            ("view_by", "보기 기준:"),
            ("daily", "매일"),
            ("weekly", "매주"),
            ("monthly", "매월"),
            ("yearly", "매년"),
            ("username", "사용자 이름"),
            ("font_size", "글꼴 크기"),
            ("small", "작음"),
            ("medium", "중간"),
            ("large", "큼"),
            ("profile", "프로필"),
            ("appearance", "모양"),
        ],
        PluralForms::invariant("{count} 개의 작업"),
    )
}

fn french() -> LocaleStrings {
    table(
        &[
            ("app_name", "Forêt de Concentration"),
            ("dashboard", "Tableau de bord"),
            ("forest", "Ma Forêt"),
            ("rooms", "Salles d'étude"),
            ("stats", "Statistiques"),
            ("settings", "Paramètres"),
            ("language", "Langue"),
            ("what_to_focus_on", "Sur quoi se concentrer ?"),
            ("start", "Commencer la concentration"),
            ("finish", "Terminer la session"),
            ("task_completed", "Tâche terminée !"),
            ("plant_tree", "Planter un arbre"),
            ("invite", "Inviter"),
            ("create_room", "Créer une salle"),
            ("theme_color", "Couleur du thème"),
            ("view_by", "Afficher par :"),
            ("daily", "Quotidien"),
            ("weekly", "Hebdomadaire"),
            ("monthly", "Mensuel"),
            ("yearly", "Annuel"),
            ("username", "Nom d'utilisateur"),
            ("font_size", "Taille de la police"),
            ("small", "Petit"),
            ("medium", "Moyen"),
            ("large", "Grand"),
            ("profile", "Profil"),
            ("appearance", "Apparence"),
        ],
        PluralForms::new("{count} tâche", "{count} tâches"),
    )
}

fn spanish() -> LocaleStrings {
    table(
        &[
            ("app_name", "Bosque de Enfoque"),
            ("dashboard", "Tablero"),
            ("forest", "Mi Bosque"),
            ("rooms", "Salas de estudio"),
            ("stats", "Estadísticas"),
            ("settings", "Configuración"),
            ("language", "Idioma"),
            ("what_to_focus_on", "¿En qué concentrarse?"),
            ("start", "Iniciar Enfoque"),
            ("finish", "Finalizar Sesión"),
            ("task_completed", "¡Tarea completada!"),
            ("plant_tree", "Plantar un árbol"),
            ("invite", "Invitar"),
            ("create_room", "Crear Sala"),
            ("theme_color", "Color del Tema"),
            ("view_by", "Ver por:"),
            ("daily", "Diario"),
            ("weekly", "Semanal"),
            ("monthly", "Mensual"),
            ("yearly", "Anual"),
            ("username", "Nombre de usuario"),
            ("font_size", "Tamaño de fuente"),
            ("small", "Pequeño"),
            ("medium", "Mediano"),
            ("large", "Grande"),
            ("profile", "Perfil"),
            ("appearance", "Apariencia"),
        ],
        PluralForms::new("{count} tarea", "{count} tareas"),
    )
}
