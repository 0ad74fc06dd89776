//! Built-in listener descriptors for the Android widget toolkit.
//!
//! Each entry is pure data. `ListenerRegistry::android()` validates the table
//! and resolves every type string once at startup.

/// Unvalidated shape of one listener callback method.
#[derive(Debug, Clone, Copy)]
pub struct ListenerMethodSpec {
    pub name: &'static str,
    pub return_type: &'static str,
    pub parameters: &'static [&'static str],
    /// Expression returned by an unclaimed value method.
    pub default_return: &'static str,
    /// Callback constant this method implements; `None` on single-method classes.
    pub callback: Option<&'static str>,
}

/// Unvalidated shape of one listener class, keyed by its annotation name.
#[derive(Debug, Clone, Copy)]
pub struct ListenerClassSpec {
    pub annotation: &'static str,
    pub target_type: &'static str,
    pub setter: &'static str,
    /// Empty when the listener is detached by passing `null` to the setter.
    pub remover: &'static str,
    pub listener_type: &'static str,
    /// Callback constants in declaration order; empty on single-method classes.
    pub callbacks: &'static [&'static str],
    pub default_callback: Option<&'static str>,
    pub methods: &'static [ListenerMethodSpec],
}

const fn single(
    name: &'static str,
    return_type: &'static str,
    parameters: &'static [&'static str],
    default_return: &'static str,
) -> ListenerMethodSpec {
    ListenerMethodSpec {
        name,
        return_type,
        parameters,
        default_return,
        callback: None,
    }
}

const fn callback(
    constant: &'static str,
    name: &'static str,
    parameters: &'static [&'static str],
) -> ListenerMethodSpec {
    ListenerMethodSpec {
        name,
        return_type: "void",
        parameters,
        default_return: "null",
        callback: Some(constant),
    }
}

const ADAPTER_VIEW: &str = "android.widget.AdapterView<?>";
const VIEW: &str = "android.view.View";
const TEXT_VIEW: &str = "android.widget.TextView";
const VIEW_PAGER: &str = "android.support.v4.view.ViewPager";

pub static ANDROID_LISTENERS: &[ListenerClassSpec] = &[
    ListenerClassSpec {
        annotation: "OnCheckedChanged",
        target_type: "android.widget.CompoundButton",
        setter: "setOnCheckedChangeListener",
        remover: "",
        listener_type: "android.widget.CompoundButton.OnCheckedChangeListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single(
            "onCheckedChanged",
            "void",
            &["android.widget.CompoundButton", "boolean"],
            "null",
        )],
    },
    ListenerClassSpec {
        annotation: "OnClick",
        target_type: VIEW,
        setter: "setOnClickListener",
        remover: "",
        listener_type: "android.view.View.OnClickListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single("onClick", "void", &[VIEW], "null")],
    },
    ListenerClassSpec {
        annotation: "OnEditorAction",
        target_type: TEXT_VIEW,
        setter: "setOnEditorActionListener",
        remover: "",
        listener_type: "android.widget.TextView.OnEditorActionListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single(
            "onEditorAction",
            "boolean",
            &[TEXT_VIEW, "int", "android.view.KeyEvent"],
            "false",
        )],
    },
    ListenerClassSpec {
        annotation: "OnFocusChange",
        target_type: VIEW,
        setter: "setOnFocusChangeListener",
        remover: "",
        listener_type: "android.view.View.OnFocusChangeListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single("onFocusChange", "void", &[VIEW, "boolean"], "null")],
    },
    ListenerClassSpec {
        annotation: "OnItemClick",
        target_type: ADAPTER_VIEW,
        setter: "setOnItemClickListener",
        remover: "",
        listener_type: "android.widget.AdapterView.OnItemClickListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single(
            "onItemClick",
            "void",
            &[ADAPTER_VIEW, VIEW, "int", "long"],
            "null",
        )],
    },
    ListenerClassSpec {
        annotation: "OnItemLongClick",
        target_type: ADAPTER_VIEW,
        setter: "setOnItemLongClickListener",
        remover: "",
        listener_type: "android.widget.AdapterView.OnItemLongClickListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single(
            "onItemLongClick",
            "boolean",
            &[ADAPTER_VIEW, VIEW, "int", "long"],
            "false",
        )],
    },
    ListenerClassSpec {
        annotation: "OnItemSelected",
        target_type: ADAPTER_VIEW,
        setter: "setOnItemSelectedListener",
        remover: "",
        listener_type: "android.widget.AdapterView.OnItemSelectedListener",
        callbacks: &["ITEM_SELECTED", "NOTHING_SELECTED"],
        default_callback: Some("ITEM_SELECTED"),
        methods: &[
            callback(
                "ITEM_SELECTED",
                "onItemSelected",
                &[ADAPTER_VIEW, VIEW, "int", "long"],
            ),
            callback("NOTHING_SELECTED", "onNothingSelected", &[ADAPTER_VIEW]),
        ],
    },
    ListenerClassSpec {
        annotation: "OnLongClick",
        target_type: VIEW,
        setter: "setOnLongClickListener",
        remover: "",
        listener_type: "android.view.View.OnLongClickListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single("onLongClick", "boolean", &[VIEW], "false")],
    },
    ListenerClassSpec {
        annotation: "OnPageChange",
        target_type: VIEW_PAGER,
        setter: "addOnPageChangeListener",
        remover: "removeOnPageChangeListener",
        listener_type: "android.support.v4.view.ViewPager.OnPageChangeListener",
        callbacks: &[
            "PAGE_SELECTED",
            "PAGE_SCROLLED",
            "PAGE_SCROLL_STATE_CHANGED",
        ],
        default_callback: Some("PAGE_SELECTED"),
        methods: &[
            callback("PAGE_SELECTED", "onPageSelected", &["int"]),
            callback(
                "PAGE_SCROLLED",
                "onPageScrolled",
                &["int", "float", "int"],
            ),
            callback(
                "PAGE_SCROLL_STATE_CHANGED",
                "onPageScrollStateChanged",
                &["int"],
            ),
        ],
    },
    ListenerClassSpec {
        annotation: "OnTextChanged",
        target_type: TEXT_VIEW,
        setter: "addTextChangedListener",
        remover: "removeTextChangedListener",
        listener_type: "android.text.TextWatcher",
        callbacks: &["TEXT_CHANGED", "BEFORE_TEXT_CHANGED", "AFTER_TEXT_CHANGED"],
        default_callback: Some("TEXT_CHANGED"),
        methods: &[
            callback(
                "TEXT_CHANGED",
                "onTextChanged",
                &["java.lang.CharSequence", "int", "int", "int"],
            ),
            callback(
                "BEFORE_TEXT_CHANGED",
                "beforeTextChanged",
                &["java.lang.CharSequence", "int", "int", "int"],
            ),
            callback(
                "AFTER_TEXT_CHANGED",
                "afterTextChanged",
                &["android.text.Editable"],
            ),
        ],
    },
    ListenerClassSpec {
        annotation: "OnTouch",
        target_type: VIEW,
        setter: "setOnTouchListener",
        remover: "",
        listener_type: "android.view.View.OnTouchListener",
        callbacks: &[],
        default_callback: None,
        methods: &[single(
            "onTouch",
            "boolean",
            &[VIEW, "android.view.MotionEvent"],
            "false",
        )],
    },
];
